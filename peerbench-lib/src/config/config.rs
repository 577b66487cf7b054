use crate::Result;
use crate::metrics::SimilarityCriterion;
use crate::ranking::{MAX_PEERS, TieBreak};
use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;

/// Log target for configuration
const LOG_TARGET: &str = "config";

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// The file looked for in the dataset directory when no explicit configuration is given
pub const CONFIG_FILE: &str = "peerbench.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Similarity criteria used when none are given on the command line
    #[serde(default)]
    pub criteria: Vec<SimilarityCriterion>,

    /// Ordering of candidates with equal distance
    #[serde(default)]
    pub tie_break: TieBreak,

    /// Number of top-ranked candidates to select as peers by default
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
}

const fn default_top_n() -> usize {
    10
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// An explicit path must exist. Without one, `peerbench.toml` in `dir` is used when present.
    pub fn load(dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).with_context(|| format!("reading peerbench configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = dir.join(CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!(target: LOG_TARGET, "No '{path}' found, using the default configuration");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).with_context(|| format!("reading peerbench configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).with_context(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate().with_context(|| format!("validating configuration file '{final_path}'"))?;

        log::info!(target: LOG_TARGET, "Loaded configuration from '{final_path}'");
        Ok(config)
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).with_context(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.default_top_n > MAX_PEERS {
            bail!("default_top_n must be at most {MAX_PEERS}, got {}", self.default_top_n);
        }

        let mut seen = HashSet::new();
        for criterion in &self.criteria {
            if !seen.insert(criterion) {
                bail!("criterion '{criterion}' is listed more than once");
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

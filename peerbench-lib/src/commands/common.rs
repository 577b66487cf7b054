use crate::Result;
use crate::config::Config;
use crate::dataset::{AgencyId, Dataset, Universe};
use crate::ranking::{MAX_PEERS, PeerSelection, RankingPipeline, SelectionChange};
use crate::reports::ColorMode;
use camino::Utf8PathBuf;
use clap::Args;

/// Log target for command output
const LOG_TARGET: &str = "commands";

/// Where the dataset and its configuration live.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Directory containing agencies.json and the optional yearly, mode and metadata files
    #[arg(long, value_name = "DIR", env = "PEERBENCH_DATA", default_value = ".")]
    pub data: Utf8PathBuf,

    /// Configuration file [default: peerbench.toml in the dataset directory]
    #[arg(long, value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// When to color the output
    #[arg(long, value_enum, value_name = "WHEN", default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

impl DataArgs {
    pub fn load(&self) -> Result<(Dataset, Config)> {
        let config = Config::load(&self.data, self.config.as_ref())?;
        let dataset = Dataset::load(&self.data)?;
        Ok((dataset, config))
    }

    pub fn colors(&self) -> bool {
        self.color.enabled()
    }
}

/// Explain why a peer did not make it into the selection.
pub fn warn_if_rejected(change: SelectionChange, id: AgencyId, home: AgencyId) {
    match change {
        SelectionChange::Rejected if id == home => {
            log::warn!(target: LOG_TARGET, "{id} is the home agency and cannot be its own peer");
        }
        SelectionChange::Rejected => {
            log::warn!(target: LOG_TARGET, "The peer selection is full ({MAX_PEERS} agencies), ignoring {id}");
        }
        SelectionChange::Added | SelectionChange::Removed => {}
    }
}

/// Choose the peers of `home`.
///
/// Explicit `peers` are added in order until the selection is full. Without any, the most
/// similar agencies under the configured criteria are selected.
pub fn select_peers(universe: Universe, config: &Config, home: AgencyId, peers: &[AgencyId]) -> Result<(Universe, PeerSelection)> {
    if peers.is_empty() {
        let mut pipeline = RankingPipeline::new(universe, home, config.criteria.clone(), config.tie_break)?;
        pipeline.select_top(config.default_top_n);
        log::info!(target: LOG_TARGET, "No peers given, using the {} most similar agencies", pipeline.selection().len());

        let selection = pipeline.selection().clone();
        return Ok((pipeline.into_universe(), selection));
    }

    let _ = universe.require(home)?;
    let mut selection = PeerSelection::new(home);
    for &id in peers {
        let _ = universe.require(id)?;
        if selection.contains(id) {
            continue;
        }

        warn_if_rejected(selection.toggle(id), id, home);
    }

    Ok((universe, selection))
}

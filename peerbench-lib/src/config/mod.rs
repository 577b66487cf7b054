#[expect(clippy::module_inception, reason = "Config is the core type of this module")]
mod config;

pub use config::{CONFIG_FILE, Config, DEFAULT_CONFIG_TOML};

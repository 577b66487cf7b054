use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::Display;

/// How candidates with equal similarity distance are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TieBreak {
    /// Keep the order candidates had in the universe.
    #[default]
    InputOrder,

    /// Order by ascending agency identifier.
    Identifier,
}

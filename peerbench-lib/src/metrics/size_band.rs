use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Coarse size buckets used to narrow candidates by ridership or population.
///
/// Lower bounds are inclusive and upper bounds exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum SizeBand {
    VeryLarge,
    Large,
    Medium,
    Small,
    VerySmall,
}

impl SizeBand {
    /// Annual trip range covered by this band.
    #[must_use]
    pub const fn ridership_bounds(self) -> (f64, Option<f64>) {
        match self {
            Self::VeryLarge => (100_000_000.0, None),
            Self::Large => (10_000_000.0, Some(100_000_000.0)),
            Self::Medium => (1_000_000.0, Some(10_000_000.0)),
            Self::Small => (100_000.0, Some(1_000_000.0)),
            Self::VerySmall => (0.0, Some(100_000.0)),
        }
    }

    /// Urbanized area population range covered by this band.
    #[must_use]
    pub const fn population_bounds(self) -> (f64, Option<f64>) {
        match self {
            Self::VeryLarge => (2_000_000.0, None),
            Self::Large => (500_000.0, Some(2_000_000.0)),
            Self::Medium => (100_000.0, Some(500_000.0)),
            Self::Small => (50_000.0, Some(100_000.0)),
            Self::VerySmall => (0.0, Some(50_000.0)),
        }
    }

    #[must_use]
    pub fn contains_ridership(self, ridership: f64) -> bool {
        within(self.ridership_bounds(), ridership)
    }

    #[must_use]
    pub fn contains_population(self, population: f64) -> bool {
        within(self.population_bounds(), population)
    }

    #[must_use]
    pub const fn ridership_label(self) -> &'static str {
        match self {
            Self::VeryLarge => "Very Large (>100M trips)",
            Self::Large => "Large (10M-100M trips)",
            Self::Medium => "Medium (1M-10M trips)",
            Self::Small => "Small (100K-1M trips)",
            Self::VerySmall => "Very Small (<100K trips)",
        }
    }

    #[must_use]
    pub const fn population_label(self) -> &'static str {
        match self {
            Self::VeryLarge => "Very Large (>2M)",
            Self::Large => "Large (500K-2M)",
            Self::Medium => "Medium (100K-500K)",
            Self::Small => "Small (50K-100K)",
            Self::VerySmall => "Very Small (<50K)",
        }
    }
}

fn within((min, max): (f64, Option<f64>), value: f64) -> bool {
    value >= min && max.is_none_or(|max| value < max)
}

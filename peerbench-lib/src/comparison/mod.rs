//! Comparing the home agency's performance with its peers over time and across modes.

#[expect(clippy::module_inception, reason = "Comparison is the core type of this module")]
mod comparison;
mod mode_breakdown;

pub use comparison::{Comparison, ComparisonRow, compare};
pub use mode_breakdown::{ModeBreakdown, ModeBreakdownRow, NationalTrend, mode_breakdown, national_trend};

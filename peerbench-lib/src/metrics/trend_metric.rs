use super::OperatingTotals;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A per-year performance metric for comparing agencies over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum TrendMetric {
    Ridership,
    OperatingExpenses,
    FareRevenue,
    VehicleRevenueHours,
    VehicleRevenueMiles,
    CostPerTrip,
    FarePerTrip,
    FareboxRecovery,
    RidesPerCapita,
}

impl TrendMetric {
    /// The metric's value for any set of operating totals, `None` when it is undefined or not reported.
    #[must_use]
    pub fn extract<T: OperatingTotals + ?Sized>(self, totals: &T) -> Option<f64> {
        match self {
            Self::Ridership => Some(totals.ridership()),
            Self::OperatingExpenses => Some(totals.operating_expenses()),
            Self::FareRevenue => Some(totals.fare_revenue()),
            Self::VehicleRevenueHours => Some(totals.vehicle_revenue_hours()),
            Self::VehicleRevenueMiles => totals.vehicle_revenue_miles(),
            Self::CostPerTrip => totals.cost_per_trip(),
            Self::FarePerTrip => totals.fare_per_trip(),
            Self::FareboxRecovery => totals.farebox_recovery(),
            Self::RidesPerCapita => totals.rides_per_capita(),
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Ridership => "Annual unlinked passenger trips",
            Self::OperatingExpenses => "Total operating expenses",
            Self::FareRevenue => "Fare revenue earned",
            Self::VehicleRevenueHours => "Vehicle revenue hours",
            Self::VehicleRevenueMiles => "Vehicle revenue miles",
            Self::CostPerTrip => "Operating cost per trip",
            Self::FarePerTrip => "Fare revenue per trip",
            Self::FareboxRecovery => "Fare revenue as a share of operating cost",
            Self::RidesPerCapita => "Trips per urbanized area resident",
        }
    }

    /// Whether values are ratios rather than totals, which affects display precision.
    #[must_use]
    pub const fn is_ratio(self) -> bool {
        matches!(self, Self::CostPerTrip | Self::FarePerTrip | Self::FareboxRecovery | Self::RidesPerCapita)
    }
}

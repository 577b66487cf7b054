use super::OperatingTotals;
use crate::dataset::Agency;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A scalar agency metric that can serve as one dimension of similarity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum SimilarityCriterion {
    Population,
    Ridership,
    FarePerTrip,
    CostPerTrip,
    OperatingExpenses,
    VehicleRevenueHours,
    VehicleRevenueMiles,
    RidesPerCapita,
}

impl SimilarityCriterion {
    /// The raw metric value for an agency. Missing or undefined values read as 0.
    #[must_use]
    pub fn extract(self, agency: &Agency) -> f64 {
        let value = match self {
            Self::Population => agency.population,
            Self::Ridership => Some(agency.ridership),
            Self::FarePerTrip => agency.fare_per_trip(),
            Self::CostPerTrip => agency.cost_per_trip(),
            Self::OperatingExpenses => Some(agency.operating_expenses),
            Self::VehicleRevenueHours => Some(agency.vehicle_revenue_hours),
            Self::VehicleRevenueMiles => Some(agency.vehicle_revenue_miles),
            Self::RidesPerCapita => agency.rides_per_capita(),
        };

        value.unwrap_or(0.0)
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Population => "Urbanized area population",
            Self::Ridership => "Annual unlinked passenger trips",
            Self::FarePerTrip => "Fare revenue per trip",
            Self::CostPerTrip => "Operating cost per trip",
            Self::OperatingExpenses => "Total operating expenses",
            Self::VehicleRevenueHours => "Vehicle revenue hours",
            Self::VehicleRevenueMiles => "Vehicle revenue miles",
            Self::RidesPerCapita => "Trips per urbanized area resident",
        }
    }
}

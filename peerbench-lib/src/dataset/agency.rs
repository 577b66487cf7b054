use super::{AgencyId, ModeCode};
use crate::metrics::OperatingTotals;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One transit agency as reported in the latest reporting year.
///
/// Whether an agency is the home agency or a peer is a role tracked by the caller, not a property of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agency {
    pub id: AgencyId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub reporter_type: String,
    pub organization_type: String,

    /// Every mode the agency operates.
    pub modes: HashSet<ModeCode>,

    /// Name of the primary urbanized area the agency serves.
    pub uza_name: Option<String>,

    /// Population of the primary urbanized area, when reported.
    pub population: Option<f64>,

    /// Vehicles operated in maximum service.
    pub vehicles_operated: Option<f64>,

    /// Annual unlinked passenger trips.
    pub ridership: f64,
    pub operating_expenses: f64,
    pub fare_revenue: f64,
    pub vehicle_revenue_hours: f64,
    pub vehicle_revenue_miles: f64,
}

impl Agency {
    /// Create an agency with the given identity and all metrics zeroed.
    #[must_use]
    pub fn new(id: AgencyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            city: String::new(),
            state: String::new(),
            reporter_type: String::new(),
            organization_type: String::new(),
            modes: HashSet::new(),
            uza_name: None,
            population: None,
            vehicles_operated: None,
            ridership: 0.0,
            operating_expenses: 0.0,
            fare_revenue: 0.0,
            vehicle_revenue_hours: 0.0,
            vehicle_revenue_miles: 0.0,
        }
    }

    #[must_use]
    pub fn operates(&self, mode: &ModeCode) -> bool {
        self.modes.contains(mode)
    }

    /// Modes sorted by code, for stable display.
    #[must_use]
    pub fn sorted_modes(&self) -> Vec<&ModeCode> {
        let mut modes: Vec<_> = self.modes.iter().collect();
        modes.sort_unstable();
        modes
    }
}

impl OperatingTotals for Agency {
    fn ridership(&self) -> f64 {
        self.ridership
    }

    fn operating_expenses(&self) -> f64 {
        self.operating_expenses
    }

    fn fare_revenue(&self) -> f64 {
        self.fare_revenue
    }

    fn vehicle_revenue_hours(&self) -> f64 {
        self.vehicle_revenue_hours
    }

    fn vehicle_revenue_miles(&self) -> Option<f64> {
        Some(self.vehicle_revenue_miles)
    }

    fn population(&self) -> Option<f64> {
        self.population
    }
}

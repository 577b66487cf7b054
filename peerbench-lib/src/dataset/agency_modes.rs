use super::{AgencyId, ModeCode};
use crate::metrics::OperatingTotals;
use std::collections::{BTreeSet, HashMap};

/// Log target for the dataset
const LOG_TARGET: &str = "dataset";

/// One agency's latest-year totals for a single mode.
#[derive(Debug, Clone, PartialEq)]
pub struct AgencyModeRecord {
    pub id: AgencyId,
    pub mode: ModeCode,
    pub name: String,
    pub ridership: f64,
    pub operating_expenses: f64,
    pub fare_revenue: f64,
    pub vehicle_revenue_hours: f64,

    /// Vehicles operated in maximum service in this mode.
    pub vehicles_operated: Option<f64>,
}

impl AgencyModeRecord {
    #[must_use]
    pub fn new(id: AgencyId, mode: impl Into<ModeCode>) -> Self {
        Self {
            id,
            mode: mode.into(),
            name: String::new(),
            ridership: 0.0,
            operating_expenses: 0.0,
            fare_revenue: 0.0,
            vehicle_revenue_hours: 0.0,
            vehicles_operated: None,
        }
    }
}

impl OperatingTotals for AgencyModeRecord {
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
}

/// Latest-year per-mode breakdown, grouped by agency and sorted by mode code.
#[derive(Debug, Clone, Default)]
pub struct AgencyModes {
    by_agency: HashMap<AgencyId, Vec<AgencyModeRecord>>,
}

impl AgencyModes {
    /// Group records by agency. When an (agency, mode) pair repeats, the first record wins.
    #[must_use]
    pub fn new(records: impl IntoIterator<Item = AgencyModeRecord>) -> Self {
        let mut by_agency: HashMap<AgencyId, Vec<AgencyModeRecord>> = HashMap::new();

        for record in records {
            let entries = by_agency.entry(record.id).or_default();
            if entries.iter().any(|existing| existing.mode == record.mode) {
                log::warn!(target: LOG_TARGET, "Ignoring duplicate {} mode record for agency {}", record.mode, record.id);
                continue;
            }

            entries.push(record);
        }

        for entries in by_agency.values_mut() {
            entries.sort_by(|a, b| a.mode.cmp(&b.mode));
        }

        Self { by_agency }
    }

    /// One agency's modes in code order; empty when the agency has no breakdown.
    #[must_use]
    pub fn for_agency(&self, id: AgencyId) -> &[AgencyModeRecord] {
        self.by_agency.get(&id).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn record(&self, id: AgencyId, mode: &ModeCode) -> Option<&AgencyModeRecord> {
        self.for_agency(id).iter().find(|record| &record.mode == mode)
    }

    /// Every mode reported by any of `ids`, sorted by code.
    pub fn modes_of(&self, ids: impl IntoIterator<Item = AgencyId>) -> Vec<ModeCode> {
        ids.into_iter()
            .flat_map(|id| self.for_agency(id).iter().map(|record| record.mode.clone()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    #[must_use]
    pub fn agency_count(&self) -> usize {
        self.by_agency.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_agency.is_empty()
    }
}

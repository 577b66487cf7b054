use super::AgencyId;
use crate::metrics::OperatingTotals;
use std::collections::{BTreeSet, HashMap};

/// Log target for the dataset
const LOG_TARGET: &str = "dataset";

/// One agency's totals for one reporting year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyRecord {
    pub id: AgencyId,
    pub year: u16,
    pub name: String,
    pub ridership: f64,
    pub operating_expenses: f64,
    pub fare_revenue: f64,
    pub vehicle_revenue_hours: f64,
    pub vehicle_revenue_miles: f64,
    pub vehicles_operated: Option<f64>,
    pub population: Option<f64>,
}

impl YearlyRecord {
    #[must_use]
    pub fn new(id: AgencyId, year: u16) -> Self {
        Self {
            id,
            year,
            name: String::new(),
            ridership: 0.0,
            operating_expenses: 0.0,
            fare_revenue: 0.0,
            vehicle_revenue_hours: 0.0,
            vehicle_revenue_miles: 0.0,
            vehicles_operated: None,
            population: None,
        }
    }
}

impl OperatingTotals for YearlyRecord {
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

/// Per-year records grouped by agency, each group sorted by year.
#[derive(Debug, Clone, Default)]
pub struct YearlySeries {
    by_agency: HashMap<AgencyId, Vec<YearlyRecord>>,
    years: BTreeSet<u16>,
}

impl YearlySeries {
    /// Group records by agency. When an (agency, year) pair repeats, the first record wins.
    #[must_use]
    pub fn new(records: impl IntoIterator<Item = YearlyRecord>) -> Self {
        let mut by_agency: HashMap<AgencyId, Vec<YearlyRecord>> = HashMap::new();
        let mut years = BTreeSet::new();

        for record in records {
            let entries = by_agency.entry(record.id).or_default();
            if entries.iter().any(|existing| existing.year == record.year) {
                log::warn!(target: LOG_TARGET, "Ignoring duplicate {} record for agency {}", record.year, record.id);
                continue;
            }

            let _ = years.insert(record.year);
            entries.push(record);
        }

        for entries in by_agency.values_mut() {
            entries.sort_by_key(|record| record.year);
        }

        Self { by_agency, years }
    }

    /// Records for one agency in ascending year order; empty when the agency has no history.
    #[must_use]
    pub fn for_agency(&self, id: AgencyId) -> &[YearlyRecord] {
        self.by_agency.get(&id).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn record(&self, id: AgencyId, year: u16) -> Option<&YearlyRecord> {
        self.for_agency(id).iter().find(|record| record.year == year)
    }

    /// All reporting years present, ascending.
    pub fn years(&self) -> impl Iterator<Item = u16> + '_ {
        self.years.iter().copied()
    }

    #[must_use]
    pub fn latest_year(&self) -> Option<u16> {
        self.years.last().copied()
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

use super::ModeCode;
use crate::metrics::OperatingTotals;
use std::collections::{BTreeMap, BTreeSet};

/// Log target for the dataset
const LOG_TARGET: &str = "dataset";

/// Totals across every reporting agency for one mode in one year.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeTotal {
    pub year: u16,
    pub mode: ModeCode,
    pub ridership: f64,
    pub operating_expenses: f64,
    pub fare_revenue: f64,
    pub vehicle_revenue_hours: f64,
}

impl ModeTotal {
    #[must_use]
    pub fn new(year: u16, mode: impl Into<ModeCode>) -> Self {
        Self {
            year,
            mode: mode.into(),
            ridership: 0.0,
            operating_expenses: 0.0,
            fare_revenue: 0.0,
            vehicle_revenue_hours: 0.0,
        }
    }

    fn add(&mut self, other: &Self) {
        self.ridership += other.ridership;
        self.operating_expenses += other.operating_expenses;
        self.fare_revenue += other.fare_revenue;
        self.vehicle_revenue_hours += other.vehicle_revenue_hours;
    }
}

impl OperatingTotals for ModeTotal {
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

/// National totals keyed by year and mode.
#[derive(Debug, Clone, Default)]
pub struct NationalModeTotals {
    totals: BTreeMap<(u16, ModeCode), ModeTotal>,
}

impl NationalModeTotals {
    /// Index totals by year and mode. When a (year, mode) pair repeats, the first total wins.
    #[must_use]
    pub fn new(totals: impl IntoIterator<Item = ModeTotal>) -> Self {
        let mut indexed = BTreeMap::new();
        for total in totals {
            let key = (total.year, total.mode.clone());
            if indexed.contains_key(&key) {
                log::warn!(target: LOG_TARGET, "Ignoring duplicate national {} total for {}", total.mode, total.year);
                continue;
            }
            let _ = indexed.insert(key, total);
        }

        Self { totals: indexed }
    }

    #[must_use]
    pub fn get(&self, year: u16, mode: &ModeCode) -> Option<&ModeTotal> {
        self.totals.get(&(year, mode.clone()))
    }

    /// Years with at least one total, ascending.
    pub fn years(&self) -> Vec<u16> {
        self.totals.keys().map(|(year, _)| *year).collect::<BTreeSet<_>>().into_iter().collect()
    }

    /// Modes with at least one total, sorted by code.
    pub fn modes(&self) -> Vec<ModeCode> {
        self.totals.keys().map(|(_, mode)| mode.clone()).collect::<BTreeSet<_>>().into_iter().collect()
    }

    /// The sum over every mode for one year, or `None` when the year has no totals.
    #[must_use]
    pub fn all_modes(&self, year: u16) -> Option<ModeTotal> {
        let mut combined: Option<ModeTotal> = None;
        for total in self.totals.values().filter(|total| total.year == year) {
            combined
                .get_or_insert_with(|| ModeTotal::new(year, "ALL"))
                .add(total);
        }

        combined
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

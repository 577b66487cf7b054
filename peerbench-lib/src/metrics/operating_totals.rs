use super::ratio;

/// Totals reported for an agency, one of its modes, or a national aggregate, and the ratios derived from them.
///
/// Every ratio is `None` when its denominator is zero or absent.
pub trait OperatingTotals {
    /// Unlinked passenger trips.
    fn ridership(&self) -> f64;
    fn operating_expenses(&self) -> f64;
    fn fare_revenue(&self) -> f64;
    fn vehicle_revenue_hours(&self) -> f64;

    /// Not every breakdown reports revenue miles.
    fn vehicle_revenue_miles(&self) -> Option<f64> {
        None
    }

    /// Urbanized area population, for records tied to one agency.
    fn population(&self) -> Option<f64> {
        None
    }

    fn cost_per_trip(&self) -> Option<f64> {
        ratio(self.operating_expenses(), self.ridership())
    }

    fn fare_per_trip(&self) -> Option<f64> {
        ratio(self.fare_revenue(), self.ridership())
    }

    /// Share of operating expenses recovered through fares.
    fn farebox_recovery(&self) -> Option<f64> {
        ratio(self.fare_revenue(), self.operating_expenses())
    }

    fn trips_per_hour(&self) -> Option<f64> {
        ratio(self.ridership(), self.vehicle_revenue_hours())
    }

    fn rides_per_capita(&self) -> Option<f64> {
        self.population().and_then(|population| ratio(self.ridership(), population))
    }
}

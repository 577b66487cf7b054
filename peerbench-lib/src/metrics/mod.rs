mod derived;
mod operating_totals;
mod similarity_criterion;
mod size_band;
mod trend_metric;

pub use derived::ratio;
pub use operating_totals::OperatingTotals;
pub use similarity_criterion::SimilarityCriterion;
pub use size_band::SizeBand;
pub use trend_metric::TrendMetric;

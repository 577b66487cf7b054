//! The agency universe and its yearly series, as produced by the upstream data pipeline.

mod agency;
mod agency_id;
mod agency_modes;
mod categories;
mod loader;
mod metadata;
mod mode_code;
mod national_totals;
mod universe;
mod yearly_series;

pub use agency::Agency;
pub use agency_id::AgencyId;
pub use agency_modes::{AgencyModeRecord, AgencyModes};
pub use categories::Categories;
pub use loader::{AGENCIES_FILE, AGENCY_MODES_FILE, Dataset, METADATA_FILE, MODE_TOTALS_FILE, YEARLY_FILE};
pub use metadata::Metadata;
pub use mode_code::ModeCode;
pub use national_totals::{ModeTotal, NationalModeTotals};
pub use universe::{Universe, UniverseVersion};
pub use yearly_series::{YearlyRecord, YearlySeries};

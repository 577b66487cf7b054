//! Reading the flat files written by the upstream data pipeline.

use super::{
    Agency, AgencyId, AgencyModeRecord, AgencyModes, Metadata, ModeCode, ModeTotal, NationalModeTotals, Universe, YearlyRecord,
    YearlySeries,
};
use crate::Result;
use anyhow::{Context, bail};
use camino::Utf8Path;
use serde::Deserialize;
use std::fs;
use std::io;
use std::time::Instant;

/// Log target for the dataset
const LOG_TARGET: &str = "dataset";

/// Latest-year agency snapshot, one record per agency
pub const AGENCIES_FILE: &str = "agencies.json";

/// Per-agency-per-year totals
pub const YEARLY_FILE: &str = "agency_yearly.json";

/// Latest-year totals per agency and mode
pub const AGENCY_MODES_FILE: &str = "agency_modes.json";

/// National totals per year and mode
pub const MODE_TOTALS_FILE: &str = "yearly_mode_totals.json";

/// Reporting period and filter metadata
pub const METADATA_FILE: &str = "metadata.json";

/// Everything the ranking engine and the comparison views read.
#[derive(Debug)]
pub struct Dataset {
    pub universe: Universe,
    pub yearly: YearlySeries,
    pub modes: AgencyModes,
    pub national: NationalModeTotals,
    pub metadata: Metadata,
}

impl Dataset {
    /// Load a dataset directory.
    ///
    /// The agency file is required. Every other file is optional and yields empty data when missing.
    pub fn load(dir: &Utf8Path) -> Result<Self> {
        let start_time = Instant::now();

        let agencies_path = dir.join(AGENCIES_FILE);
        let agencies_json =
            fs::read_to_string(&agencies_path).with_context(|| format!("reading agency file '{agencies_path}'"))?;
        let universe = Universe::new(parse_agencies(&agencies_json).with_context(|| format!("parsing agency file '{agencies_path}'"))?)
            .with_context(|| format!("loading agency file '{agencies_path}'"))?;

        let yearly = load_optional(dir, YEARLY_FILE, "yearly series", parse_yearly)?.map_or_else(YearlySeries::default, YearlySeries::new);
        let modes =
            load_optional(dir, AGENCY_MODES_FILE, "mode breakdown", parse_agency_modes)?.map_or_else(AgencyModes::default, AgencyModes::new);
        let national = load_optional(dir, MODE_TOTALS_FILE, "national mode totals", parse_mode_totals)?
            .map_or_else(NationalModeTotals::default, NationalModeTotals::new);
        let metadata = load_optional(dir, METADATA_FILE, "metadata", |json| Ok(serde_json::from_str::<Metadata>(json)?))?.unwrap_or_default();

        log::info!(
            target: LOG_TARGET,
            "Loaded {} agencies, {} years of history for {} agencies, mode breakdowns for {} agencies and {} national mode totals in {:.3}s",
            universe.len(),
            yearly.years().count(),
            yearly.agency_count(),
            modes.agency_count(),
            national.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(Self {
            universe,
            yearly,
            modes,
            national,
            metadata,
        })
    }

    /// The year the agency snapshot describes, from the metadata or else the newest yearly record.
    #[must_use]
    pub fn latest_year(&self) -> Option<u16> {
        self.metadata.latest_year.or_else(|| self.yearly.latest_year())
    }

    /// Every reporting year in the dataset, ascending.
    #[must_use]
    pub fn reporting_years(&self) -> Vec<u16> {
        if self.metadata.years.is_empty() {
            self.yearly.years().collect()
        } else {
            let mut years = self.metadata.years.clone();
            years.sort_unstable();
            years.dedup();
            years
        }
    }
}

/// Read and parse an optional file in `dir`, logging and returning `None` when it does not exist.
fn load_optional<T>(dir: &Utf8Path, file: &str, what: &str, parse: impl FnOnce(&str) -> Result<T>) -> Result<Option<T>> {
    let path = dir.join(file);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!(target: LOG_TARGET, "No {what} found at '{path}'");
            return Ok(None);
        }
        Err(e) => return Err(e).with_context(|| format!("reading {what} file '{path}'")),
    };

    parse(&text).map(Some).with_context(|| format!("parsing {what} file '{path}'"))
}

/// Identifiers and years as the pipeline writes them: integers, floats, or strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Integer(u64),
    Float(f64),
    Text(String),
}

impl RawNumber {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "range and integrality are checked first")]
    fn to_u32(&self) -> Option<u32> {
        match self {
            Self::Integer(value) => u32::try_from(*value).ok(),
            Self::Float(value) => {
                (value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(value)).then(|| *value as u32)
            }
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AgencyRow {
    ntd_id: Option<RawNumber>,
    agency: Option<String>,
    city: Option<String>,
    state: Option<String>,
    organization_type: Option<String>,
    reporter_type: Option<String>,
    primary_uza_population: Option<f64>,
    uza_name: Option<String>,
    agency_voms: Option<f64>,
    unlinked_passenger_trips: Option<f64>,
    total_operating_expenses: Option<f64>,
    fare_revenues_earned: Option<f64>,
    vehicle_revenue_hours: Option<f64>,
    vehicle_revenue_miles: Option<f64>,
    modes: Option<Vec<String>>,
}

impl AgencyRow {
    fn into_agency(self, id: AgencyId) -> Result<Agency> {
        Ok(Agency {
            id,
            name: self.agency.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            reporter_type: self.reporter_type.unwrap_or_default(),
            organization_type: self.organization_type.unwrap_or_default(),
            modes: self.modes.unwrap_or_default().iter().map(ModeCode::new).collect(),
            uza_name: self.uza_name.filter(|name| !name.is_empty()),
            population: optional_non_negative(id, "primary_uza_population", self.primary_uza_population)?,
            vehicles_operated: optional_non_negative(id, "agency_voms", self.agency_voms)?,
            ridership: non_negative(id, "unlinked_passenger_trips", self.unlinked_passenger_trips)?,
            operating_expenses: non_negative(id, "total_operating_expenses", self.total_operating_expenses)?,
            fare_revenue: non_negative(id, "fare_revenues_earned", self.fare_revenues_earned)?,
            vehicle_revenue_hours: non_negative(id, "vehicle_revenue_hours", self.vehicle_revenue_hours)?,
            vehicle_revenue_miles: non_negative(id, "vehicle_revenue_miles", self.vehicle_revenue_miles)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct YearlyRow {
    ntd_id: Option<RawNumber>,
    report_year: Option<RawNumber>,
    agency: Option<String>,
    unlinked_passenger_trips: Option<f64>,
    total_operating_expenses: Option<f64>,
    fare_revenues_earned: Option<f64>,
    vehicle_revenue_hours: Option<f64>,
    vehicle_revenue_miles: Option<f64>,
    agency_voms: Option<f64>,
    primary_uza_population: Option<f64>,
}

impl YearlyRow {
    fn into_record(self, id: AgencyId, year: u16) -> Result<YearlyRecord> {
        Ok(YearlyRecord {
            id,
            year,
            name: self.agency.unwrap_or_default(),
            ridership: non_negative(id, "unlinked_passenger_trips", self.unlinked_passenger_trips)?,
            operating_expenses: non_negative(id, "total_operating_expenses", self.total_operating_expenses)?,
            fare_revenue: non_negative(id, "fare_revenues_earned", self.fare_revenues_earned)?,
            vehicle_revenue_hours: non_negative(id, "vehicle_revenue_hours", self.vehicle_revenue_hours)?,
            vehicle_revenue_miles: non_negative(id, "vehicle_revenue_miles", self.vehicle_revenue_miles)?,
            vehicles_operated: optional_non_negative(id, "agency_voms", self.agency_voms)?,
            population: optional_non_negative(id, "primary_uza_population", self.primary_uza_population)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct AgencyModeRow {
    ntd_id: Option<RawNumber>,
    mode: Option<String>,
    agency: Option<String>,
    unlinked_passenger_trips: Option<f64>,
    total_operating_expenses: Option<f64>,
    fare_revenues_earned: Option<f64>,
    vehicle_revenue_hours: Option<f64>,
    mode_voms: Option<f64>,
}

impl AgencyModeRow {
    fn into_record(self, id: AgencyId, mode: ModeCode) -> Result<AgencyModeRecord> {
        Ok(AgencyModeRecord {
            id,
            mode,
            name: self.agency.unwrap_or_default(),
            ridership: non_negative(id, "unlinked_passenger_trips", self.unlinked_passenger_trips)?,
            operating_expenses: non_negative(id, "total_operating_expenses", self.total_operating_expenses)?,
            fare_revenue: non_negative(id, "fare_revenues_earned", self.fare_revenues_earned)?,
            vehicle_revenue_hours: non_negative(id, "vehicle_revenue_hours", self.vehicle_revenue_hours)?,
            vehicles_operated: optional_non_negative(id, "mode_voms", self.mode_voms)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ModeTotalRow {
    report_year: Option<RawNumber>,
    mode: Option<String>,
    unlinked_passenger_trips: Option<f64>,
    total_operating_expenses: Option<f64>,
    fare_revenues_earned: Option<f64>,
    vehicle_revenue_hours: Option<f64>,
}

/// Parse the agency snapshot. Records without a usable identifier are skipped.
pub(crate) fn parse_agencies(json: &str) -> Result<Vec<Agency>> {
    let rows: Vec<AgencyRow> = serde_json::from_str(json)?;
    let mut agencies = Vec::with_capacity(rows.len());

    for row in rows {
        let Some(id) = row.ntd_id.as_ref().and_then(RawNumber::to_u32).map(AgencyId::new) else {
            log::warn!(target: LOG_TARGET, "Skipping agency '{}' without a valid NTD id", row.agency.as_deref().unwrap_or("?"));
            continue;
        };

        agencies.push(row.into_agency(id)?);
    }

    Ok(agencies)
}

/// Parse the yearly series. Records without a usable identifier or year are skipped.
pub(crate) fn parse_yearly(json: &str) -> Result<Vec<YearlyRecord>> {
    let rows: Vec<YearlyRow> = serde_json::from_str(json)?;
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let id = row.ntd_id.as_ref().and_then(RawNumber::to_u32).map(AgencyId::new);
        let year = row
            .report_year
            .as_ref()
            .and_then(RawNumber::to_u32)
            .and_then(|year| u16::try_from(year).ok());

        let (Some(id), Some(year)) = (id, year) else {
            log::warn!(target: LOG_TARGET, "Skipping yearly record for '{}' without a valid id or year", row.agency.as_deref().unwrap_or("?"));
            continue;
        };

        records.push(row.into_record(id, year)?);
    }

    Ok(records)
}

/// Parse the per-mode breakdown. Records without a usable identifier or mode are skipped.
pub(crate) fn parse_agency_modes(json: &str) -> Result<Vec<AgencyModeRecord>> {
    let rows: Vec<AgencyModeRow> = serde_json::from_str(json)?;
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let id = row.ntd_id.as_ref().and_then(RawNumber::to_u32).map(AgencyId::new);
        let mode = row.mode.as_deref().map(ModeCode::new).filter(|mode| !mode.code().is_empty());

        let (Some(id), Some(mode)) = (id, mode) else {
            log::warn!(target: LOG_TARGET, "Skipping mode record for '{}' without a valid id or mode", row.agency.as_deref().unwrap_or("?"));
            continue;
        };

        records.push(row.into_record(id, mode)?);
    }

    Ok(records)
}

/// Parse the national totals. Records without a usable year or mode are skipped.
pub(crate) fn parse_mode_totals(json: &str) -> Result<Vec<ModeTotal>> {
    let rows: Vec<ModeTotalRow> = serde_json::from_str(json)?;
    let mut totals = Vec::with_capacity(rows.len());

    for row in rows {
        let year = row
            .report_year
            .as_ref()
            .and_then(RawNumber::to_u32)
            .and_then(|year| u16::try_from(year).ok());
        let mode = row.mode.as_deref().map(ModeCode::new).filter(|mode| !mode.code().is_empty());

        let (Some(year), Some(mode)) = (year, mode) else {
            log::warn!(target: LOG_TARGET, "Skipping national total without a valid year or mode");
            continue;
        };

        let total = ModeTotal {
            ridership: national_value(year, &mode, "unlinked_passenger_trips", row.unlinked_passenger_trips)?,
            operating_expenses: national_value(year, &mode, "total_operating_expenses", row.total_operating_expenses)?,
            fare_revenue: national_value(year, &mode, "fare_revenues_earned", row.fare_revenues_earned)?,
            vehicle_revenue_hours: national_value(year, &mode, "vehicle_revenue_hours", row.vehicle_revenue_hours)?,
            year,
            mode,
        };
        totals.push(total);
    }

    Ok(totals)
}

fn national_value(year: u16, mode: &ModeCode, field: &str, value: Option<f64>) -> Result<f64> {
    match value {
        Some(v) if v < 0.0 => bail!("national {mode} total for {year} has a negative {field} ({v})"),
        other => Ok(other.unwrap_or(0.0)),
    }
}

fn non_negative(id: AgencyId, field: &str, value: Option<f64>) -> Result<f64> {
    Ok(optional_non_negative(id, field, value)?.unwrap_or(0.0))
}

fn optional_non_negative(id: AgencyId, field: &str, value: Option<f64>) -> Result<Option<f64>> {
    match value {
        Some(v) if v < 0.0 => bail!("agency {id} has a negative {field} ({v})"),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGENCIES: &str = r#"[
        {
            "ntd_id": 10001, "agency": "Metro Transit", "city": "Seattle", "state": "WA",
            "organization_type": "City", "reporter_type": "Full Reporter",
            "primary_uza_population": 3544011, "uza_name": "Seattle--Tacoma, WA",
            "agency_voms": 120, "unlinked_passenger_trips": 1000000, "total_operating_expenses": 5000000.5,
            "fare_revenues_earned": 1000000, "vehicle_revenue_hours": 50000, "vehicle_revenue_miles": 700000,
            "modes": ["MB", "lr"], "cost_per_trip": 5.0
        },
        {
            "ntd_id": "00042.0", "agency": "Bad Id"
        },
        {
            "ntd_id": 20002.0, "agency": "Rural Transit", "city": null, "state": "IA",
            "primary_uza_population": null, "unlinked_passenger_trips": 1200, "modes": null
        }
    ]"#;

    #[test]
    fn test_parse_agencies() {
        let agencies = parse_agencies(AGENCIES).unwrap();
        assert_eq!(agencies.len(), 2);

        let metro = &agencies[0];
        assert_eq!(metro.id, AgencyId::new(10001));
        assert_eq!(metro.name, "Metro Transit");
        assert_eq!(metro.population, Some(3_544_011.0));
        assert_eq!(metro.operating_expenses, 5_000_000.5);
        assert!(metro.operates(&ModeCode::new("LR")));
        assert_eq!(metro.uza_name.as_deref(), Some("Seattle--Tacoma, WA"));

        let rural = &agencies[1];
        assert_eq!(rural.id, AgencyId::new(20002));
        assert_eq!(rural.city, "");
        assert_eq!(rural.population, None);
        assert_eq!(rural.fare_revenue, 0.0);
        assert!(rural.modes.is_empty());
    }

    #[test]
    fn test_negative_metric_is_rejected() {
        let json = r#"[{ "ntd_id": 1, "agency": "Broken", "unlinked_passenger_trips": -5 }]"#;
        let err = parse_agencies(json).unwrap_err();
        assert!(err.to_string().contains("negative unlinked_passenger_trips"), "{err}");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let _ = parse_agencies("{ not json").unwrap_err();
    }

    #[test]
    fn test_parse_yearly() {
        let json = r#"[
            { "ntd_id": 10001, "report_year": 2023, "agency": "Metro Transit", "unlinked_passenger_trips": 900 },
            { "ntd_id": 10001, "report_year": 2024.0, "agency": "Metro Transit", "unlinked_passenger_trips": 1000,
              "primary_uza_population": 2000 },
            { "ntd_id": 10001, "report_year": null }
        ]"#;
        let records = parse_yearly(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].year, 2024);
        assert_eq!(records[1].population, Some(2000.0));
    }

    #[test]
    fn test_raw_number_conversion() {
        assert_eq!(RawNumber::Integer(7).to_u32(), Some(7));
        assert_eq!(RawNumber::Float(7.0).to_u32(), Some(7));
        assert_eq!(RawNumber::Float(7.5).to_u32(), None);
        assert_eq!(RawNumber::Float(-1.0).to_u32(), None);
        assert_eq!(RawNumber::Text(" 0042 ".to_string()).to_u32(), Some(42));
        assert_eq!(RawNumber::Integer(u64::MAX).to_u32(), None);
    }

    #[test]
    fn test_parse_agency_modes() {
        let json = r#"[
            { "ntd_id": 10001, "mode": "MB", "agency": "Metro Transit", "unlinked_passenger_trips": 800,
              "total_operating_expenses": 4000, "fare_revenues_earned": 800, "vehicle_revenue_hours": 40, "mode_voms": 90 },
            { "ntd_id": "10001", "mode": "lr", "agency": "Metro Transit", "unlinked_passenger_trips": 200, "mode_voms": null },
            { "ntd_id": 10001, "mode": null, "agency": "Metro Transit" },
            { "ntd_id": null, "mode": "MB", "agency": "Nobody" }
        ]"#;
        let records = parse_agency_modes(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].vehicles_operated, Some(90.0));
        assert_eq!(records[1].mode, ModeCode::new("LR"));
        assert_eq!(records[1].operating_expenses, 0.0);
        assert_eq!(records[1].vehicles_operated, None);
    }

    #[test]
    fn test_parse_mode_totals() {
        let json = r#"[
            { "report_year": 2023, "mode": "MB", "unlinked_passenger_trips": 4.1e9, "total_operating_expenses": 2.5e10,
              "fare_revenues_earned": 3.0e9, "vehicle_revenue_hours": 1.5e8 },
            { "report_year": "2022", "mode": "HR", "unlinked_passenger_trips": 2.0e9 },
            { "report_year": null, "mode": "HR" }
        ]"#;
        let totals = parse_mode_totals(json).unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].ridership, 4.1e9);
        assert_eq!(totals[1].year, 2022);
        assert_eq!(totals[1].fare_revenue, 0.0);
    }

    #[test]
    fn test_negative_national_total_is_rejected() {
        let json = r#"[{ "report_year": 2023, "mode": "MB", "vehicle_revenue_hours": -1 }]"#;
        let err = parse_mode_totals(json).unwrap_err();
        assert!(err.to_string().contains("negative vehicle_revenue_hours"), "{err}");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_all_files() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(tmp.path()).unwrap();
        fs::write(dir.join(AGENCIES_FILE), AGENCIES).unwrap();
        fs::write(dir.join(YEARLY_FILE), r#"[{ "ntd_id": 10001, "report_year": 2022 }]"#).unwrap();
        fs::write(dir.join(AGENCY_MODES_FILE), r#"[{ "ntd_id": 10001, "mode": "MB" }]"#).unwrap();
        fs::write(dir.join(MODE_TOTALS_FILE), r#"[{ "report_year": 2023, "mode": "MB" }]"#).unwrap();
        fs::write(dir.join(METADATA_FILE), r#"{ "years": [2023, 2021, 2022], "latest_year": 2023 }"#).unwrap();

        let dataset = Dataset::load(dir).unwrap();
        assert_eq!(dataset.modes.agency_count(), 1);
        assert_eq!(dataset.national.len(), 1);
        assert_eq!(dataset.latest_year(), Some(2023));
        assert_eq!(dataset.reporting_years(), [2021, 2022, 2023]);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_years_fall_back_to_yearly_series() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(tmp.path()).unwrap();
        fs::write(dir.join(AGENCIES_FILE), AGENCIES).unwrap();
        fs::write(dir.join(YEARLY_FILE), r#"[{ "ntd_id": 10001, "report_year": 2021 }, { "ntd_id": 10001, "report_year": 2022 }]"#).unwrap();

        let dataset = Dataset::load(dir).unwrap();
        assert!(dataset.modes.is_empty());
        assert!(dataset.national.is_empty());
        assert_eq!(dataset.latest_year(), Some(2022));
        assert_eq!(dataset.reporting_years(), [2021, 2022]);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_malformed_optional_file_names_the_path() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(tmp.path()).unwrap();
        fs::write(dir.join(AGENCIES_FILE), AGENCIES).unwrap();
        fs::write(dir.join(AGENCY_MODES_FILE), "{ broken").unwrap();

        let err = Dataset::load(dir).unwrap_err();
        assert!(format!("{err:#}").contains(AGENCY_MODES_FILE), "{err:#}");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_without_yearly_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(tmp.path()).unwrap();
        fs::write(dir.join(AGENCIES_FILE), AGENCIES).unwrap();

        let dataset = Dataset::load(dir).unwrap();
        assert_eq!(dataset.universe.len(), 2);
        assert!(dataset.yearly.is_empty());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_agency_file_names_the_path() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(tmp.path()).unwrap();
        let err = Dataset::load(dir).unwrap_err();
        assert!(format!("{err:#}").contains(AGENCIES_FILE), "{err:#}");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_duplicate_ids_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(tmp.path()).unwrap();
        fs::write(dir.join(AGENCIES_FILE), r#"[{ "ntd_id": 1 }, { "ntd_id": 1.0 }]"#).unwrap();
        let err = Dataset::load(dir).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate"), "{err:#}");
    }
}

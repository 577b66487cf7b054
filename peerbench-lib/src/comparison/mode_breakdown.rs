use crate::dataset::{AgencyId, AgencyModes, ModeCode, NationalModeTotals, Universe};
use crate::metrics::TrendMetric;
use crate::ranking::{PeerSelection, RankingError};

/// One agency's latest-year values per mode, aligned with [`ModeBreakdown::modes`].
#[derive(Debug, Clone, PartialEq)]
pub struct ModeBreakdownRow {
    pub id: AgencyId,
    pub name: String,

    /// `None` where the agency does not operate the mode or the metric is undefined for it.
    pub values: Vec<Option<f64>>,
}

/// The home agency and its peers split by mode for one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeBreakdown {
    pub metric: TrendMetric,

    /// Every mode operated by the home agency or a peer, sorted by code.
    pub modes: Vec<ModeCode>,
    pub home: ModeBreakdownRow,

    /// Ordered by ascending identifier.
    pub peers: Vec<ModeBreakdownRow>,
}

/// Split the home agency and its selected peers by mode.
pub fn mode_breakdown(
    universe: &Universe,
    modes: &AgencyModes,
    selection: &PeerSelection,
    metric: TrendMetric,
) -> Result<ModeBreakdown, RankingError> {
    let home = universe.require(selection.home())?;
    let peers = selection
        .iter()
        .map(|id| universe.require(id))
        .collect::<Result<Vec<_>, _>>()?;

    let mode_codes = modes.modes_of(core::iter::once(home.id).chain(selection.iter()));
    let row = |id: AgencyId, name: &str| ModeBreakdownRow {
        id,
        name: name.to_string(),
        values: mode_codes
            .iter()
            .map(|mode| modes.record(id, mode).and_then(|record| metric.extract(record)))
            .collect(),
    };

    Ok(ModeBreakdown {
        metric,
        home: row(home.id, &home.name),
        peers: peers.iter().map(|agency| row(agency.id, &agency.name)).collect(),
        modes: mode_codes,
    })
}

/// National values of one metric per mode and year.
#[derive(Debug, Clone, PartialEq)]
pub struct NationalTrend {
    pub metric: TrendMetric,

    /// Every year with national totals, ascending.
    pub years: Vec<u16>,

    /// One row per mode, values aligned with `years`.
    pub rows: Vec<(ModeCode, Vec<Option<f64>>)>,

    /// The metric over every mode combined, aligned with `years`.
    pub all_modes: Vec<Option<f64>>,
}

/// National context for `metric`, restricted to `modes` unless that is empty.
pub fn national_trend(totals: &NationalModeTotals, modes: &[ModeCode], metric: TrendMetric) -> NationalTrend {
    let years = totals.years();
    let mode_codes = if modes.is_empty() { totals.modes() } else { modes.to_vec() };

    let rows = mode_codes
        .into_iter()
        .map(|mode| {
            let values = years
                .iter()
                .map(|&year| totals.get(year, &mode).and_then(|total| metric.extract(total)))
                .collect();
            (mode, values)
        })
        .collect();

    let all_modes = years
        .iter()
        .map(|&year| totals.all_modes(year).and_then(|total| metric.extract(&total)))
        .collect();

    NationalTrend {
        metric,
        years,
        rows,
        all_modes,
    }
}

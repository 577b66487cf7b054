use crate::dataset::{AgencyId, Universe, YearlySeries};
use crate::metrics::TrendMetric;
use crate::ranking::{PeerSelection, RankingError};
use std::collections::BTreeSet;

/// One agency's values for a metric, aligned with [`Comparison::years`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub id: AgencyId,
    pub name: String,

    /// `None` where the agency did not report that year or the metric is undefined.
    pub values: Vec<Option<f64>>,
}

impl ComparisonRow {
    /// The value at a given year index.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }
}

/// A home agency's values for one metric next to each peer's and the peer average.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub metric: TrendMetric,

    /// Every year reported by the home agency or a peer, ascending.
    pub years: Vec<u16>,
    pub home: ComparisonRow,

    /// Ordered by ascending identifier.
    pub peers: Vec<ComparisonRow>,

    /// Mean of the defined peer values each year.
    pub peer_average: Vec<Option<f64>>,
}

impl Comparison {
    /// Home value minus peer average at the latest year where both are defined.
    #[must_use]
    pub fn latest_gap(&self) -> Option<(u16, f64)> {
        self.years
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, &year)| {
                let home = self.home.value(index)?;
                let average = self.peer_average.get(index).copied().flatten()?;
                Some((year, home - average))
            })
    }
}

/// Line up the home agency and its selected peers on one metric across the years they reported.
///
/// The selection holds at most [`MAX_PEERS`](crate::ranking::MAX_PEERS) peers and never the home agency.
pub fn compare(
    universe: &Universe,
    series: &YearlySeries,
    selection: &PeerSelection,
    metric: TrendMetric,
) -> Result<Comparison, RankingError> {
    let home = selection.home();
    let home_agency = universe.require(home)?;

    let peer_ids: Vec<AgencyId> = selection.iter().collect();
    for &id in &peer_ids {
        let _ = universe.require(id)?;
    }

    let years: Vec<u16> = core::iter::once(home)
        .chain(peer_ids.iter().copied())
        .flat_map(|id| series.for_agency(id).iter().map(|record| record.year))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let row = |id: AgencyId, name: &str| ComparisonRow {
        id,
        name: name.to_string(),
        values: years
            .iter()
            .map(|&year| series.record(id, year).and_then(|record| metric.extract(record)))
            .collect(),
    };

    let home_row = row(home, &home_agency.name);
    let peer_rows: Vec<ComparisonRow> = peer_ids
        .iter()
        .filter_map(|&id| universe.get(id).map(|agency| row(id, &agency.name)))
        .collect();

    let peer_average = (0..years.len())
        .map(|index| {
            let defined: Vec<f64> = peer_rows.iter().filter_map(|row| row.value(index)).collect();
            #[expect(clippy::cast_precision_loss, reason = "peer counts are tiny")]
            let count = defined.len() as f64;
            (!defined.is_empty()).then(|| defined.iter().sum::<f64>() / count)
        })
        .collect();

    Ok(Comparison {
        metric,
        years,
        home: home_row,
        peers: peer_rows,
        peer_average,
    })
}

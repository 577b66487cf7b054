//! Recomputing the ranked candidate list as the analyst changes inputs.

use super::{
    FilterSet, NormalizedValues, PeerSelection, RankedCandidate, RankingError, SelectionChange, TieBreak, filter_candidates,
    rank_by_similarity_with,
};
use crate::dataset::{Agency, AgencyId, Universe};
use crate::metrics::SimilarityCriterion;
use std::time::Instant;

/// Log target for the ranking engine
const LOG_TARGET: &str = "ranking";

/// Filter then rank the universe against `home`.
///
/// This is a pure function of its inputs. Every criterion must already be present in `normalized`.
pub fn rank_candidates<'u>(
    universe: &'u Universe,
    home: AgencyId,
    filters: &FilterSet,
    criteria: &[SimilarityCriterion],
    normalized: &NormalizedValues,
    tie_break: TieBreak,
) -> Result<Vec<RankedCandidate<'u>>, RankingError> {
    let _ = universe.require(home)?;
    let candidates = filter_candidates(universe, home, filters);
    rank_by_similarity_with(candidates, home, criteria, normalized, tie_break)
}

/// Owns the universe and the analyst's selections, and keeps the ranked candidate list current.
///
/// Each setter recomputes the ranking. If recomputation fails, the pipeline keeps its previous state.
#[derive(Debug)]
pub struct RankingPipeline {
    universe: Universe,
    normalized: NormalizedValues,
    home: AgencyId,
    filters: FilterSet,
    criteria: Vec<SimilarityCriterion>,
    tie_break: TieBreak,
    ranked: Vec<(AgencyId, f64)>,
    selection: PeerSelection,
}

impl RankingPipeline {
    pub fn new(
        universe: Universe,
        home: AgencyId,
        criteria: impl IntoIterator<Item = SimilarityCriterion>,
        tie_break: TieBreak,
    ) -> Result<Self, RankingError> {
        let mut pipeline = Self {
            normalized: NormalizedValues::new(),
            home,
            filters: FilterSet::new(),
            criteria: dedup(criteria),
            tie_break,
            ranked: Vec::new(),
            selection: PeerSelection::new(home),
            universe,
        };

        pipeline.ranked = pipeline.compute(home, &pipeline.filters.clone(), &pipeline.criteria.clone(), tie_break)?;
        Ok(pipeline)
    }

    #[must_use]
    pub const fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Give up the pipeline, keeping the universe it was built on.
    #[must_use]
    pub fn into_universe(self) -> Universe {
        self.universe
    }

    #[must_use]
    pub const fn home(&self) -> AgencyId {
        self.home
    }

    #[must_use]
    pub fn home_agency(&self) -> Option<&Agency> {
        self.universe.get(self.home)
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterSet {
        &self.filters
    }

    #[must_use]
    pub fn criteria(&self) -> &[SimilarityCriterion] {
        &self.criteria
    }

    #[must_use]
    pub const fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    #[must_use]
    pub const fn normalized(&self) -> &NormalizedValues {
        &self.normalized
    }

    #[must_use]
    pub const fn selection(&self) -> &PeerSelection {
        &self.selection
    }

    /// The current ranking, most similar first.
    pub fn ranked(&self) -> impl Iterator<Item = RankedCandidate<'_>> + '_ {
        self.ranked.iter().filter_map(|&(id, distance)| {
            self.universe.get(id).map(|agency| RankedCandidate { agency, distance })
        })
    }

    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.ranked.len()
    }

    /// Change the home agency. A peer that becomes the home agency leaves the selection.
    pub fn set_home(&mut self, home: AgencyId) -> Result<(), RankingError> {
        self.ranked = self.compute(home, &self.filters.clone(), &self.criteria.clone(), self.tie_break)?;
        self.home = home;
        self.selection.rehome(home);
        Ok(())
    }

    pub fn set_filters(&mut self, filters: FilterSet) -> Result<(), RankingError> {
        self.ranked = self.compute(self.home, &filters, &self.criteria.clone(), self.tie_break)?;
        self.filters = filters;
        Ok(())
    }

    /// Change the similarity criteria. Repeated criteria count once.
    pub fn set_criteria(&mut self, criteria: impl IntoIterator<Item = SimilarityCriterion>) -> Result<(), RankingError> {
        let criteria = dedup(criteria);
        self.ranked = self.compute(self.home, &self.filters.clone(), &criteria, self.tie_break)?;
        self.criteria = criteria;
        Ok(())
    }

    pub fn set_tie_break(&mut self, tie_break: TieBreak) -> Result<(), RankingError> {
        self.ranked = self.compute(self.home, &self.filters.clone(), &self.criteria.clone(), tie_break)?;
        self.tie_break = tie_break;
        Ok(())
    }

    pub fn toggle_peer(&mut self, id: AgencyId) -> Result<SelectionChange, RankingError> {
        let _ = self.universe.require(id)?;
        Ok(self.selection.toggle(id))
    }

    /// Replace the selection with the `n` most similar candidates.
    pub fn select_top(&mut self, n: usize) {
        self.selection.select_top_n(n, self.ranked.iter().map(|&(id, _)| id));
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn compute(
        &mut self,
        home: AgencyId,
        filters: &FilterSet,
        criteria: &[SimilarityCriterion],
        tie_break: TieBreak,
    ) -> Result<Vec<(AgencyId, f64)>, RankingError> {
        let start_time = Instant::now();

        self.normalized.ensure(&self.universe, criteria.iter().copied())?;
        let ranked = rank_candidates(&self.universe, home, filters, criteria, &self.normalized, tie_break)?;

        log::debug!(
            target: LOG_TARGET,
            "Ranked {} of {} agencies against {home} on [{}] in {:.3}ms",
            ranked.len(),
            self.universe.len(),
            criteria.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
            start_time.elapsed().as_secs_f64() * 1000.0
        );

        Ok(ranked.into_iter().map(|c| (c.id(), c.distance)).collect())
    }
}

fn dedup(criteria: impl IntoIterator<Item = SimilarityCriterion>) -> Vec<SimilarityCriterion> {
    let mut unique = Vec::new();
    for criterion in criteria {
        if !unique.contains(&criterion) {
            unique.push(criterion);
        }
    }
    unique
}

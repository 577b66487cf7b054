//! Similarity distance between the home agency and candidates.

use super::{NormalizedValues, RankingError, TieBreak};
use crate::dataset::{Agency, AgencyId};
use crate::metrics::SimilarityCriterion;

/// A candidate paired with its distance from the home agency. Smaller is more similar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedCandidate<'a> {
    pub agency: &'a Agency,
    pub distance: f64,
}

impl RankedCandidate<'_> {
    #[must_use]
    pub const fn id(&self) -> AgencyId {
        self.agency.id
    }
}

/// Manhattan distance between two agencies over the selected normalized criteria.
///
/// With no criteria the distance is 0.
pub fn distance(
    home: AgencyId,
    candidate: AgencyId,
    criteria: &[SimilarityCriterion],
    normalized: &NormalizedValues,
) -> Result<f64, RankingError> {
    let mut total = 0.0;
    for &criterion in criteria {
        total += (normalized.value(criterion, home)? - normalized.value(criterion, candidate)?).abs();
    }

    Ok(total)
}

/// Rank candidates by ascending distance from `home`, keeping input order among equal distances.
pub fn rank_by_similarity<'a>(
    candidates: impl IntoIterator<Item = &'a Agency>,
    home: AgencyId,
    criteria: &[SimilarityCriterion],
    normalized: &NormalizedValues,
) -> Result<Vec<RankedCandidate<'a>>, RankingError> {
    rank_by_similarity_with(candidates, home, criteria, normalized, TieBreak::InputOrder)
}

/// Rank candidates by ascending distance from `home`, ordering equal distances by `tie_break`.
pub fn rank_by_similarity_with<'a>(
    candidates: impl IntoIterator<Item = &'a Agency>,
    home: AgencyId,
    criteria: &[SimilarityCriterion],
    normalized: &NormalizedValues,
    tie_break: TieBreak,
) -> Result<Vec<RankedCandidate<'a>>, RankingError> {
    let mut ranked = candidates
        .into_iter()
        .map(|agency| {
            Ok(RankedCandidate {
                agency,
                distance: distance(home, agency.id, criteria, normalized)?,
            })
        })
        .collect::<Result<Vec<_>, RankingError>>()?;

    // sort_by is stable, which is what makes InputOrder hold
    match tie_break {
        TieBreak::InputOrder => ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance)),
        TieBreak::Identifier => ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance).then_with(|| a.id().cmp(&b.id()))),
    }

    Ok(ranked)
}

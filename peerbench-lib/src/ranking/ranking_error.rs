use crate::dataset::AgencyId;
use crate::metrics::SimilarityCriterion;

/// Contract violations raised by the ranking engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RankingError {
    #[error("agency {0} is not in the universe")]
    AgencyNotFound(AgencyId),

    #[error("duplicate agency identifier {0} in the universe")]
    DuplicateAgency(AgencyId),

    #[error("{criterion} value {value} for agency {id} is outside the domain of ln(x + 1)")]
    InvalidInput {
        criterion: SimilarityCriterion,
        id: AgencyId,
        value: f64,
    },

    #[error("{0} has not been normalized for this universe")]
    NotNormalized(SimilarityCriterion),
}

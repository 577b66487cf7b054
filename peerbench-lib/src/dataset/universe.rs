use super::{Agency, AgencyId, Categories};
use crate::ranking::RankingError;
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::sync::atomic::{AtomicU64, Ordering};
use std::collections::HashMap;

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// Identifies one load of the agency universe.
///
/// Every constructed [`Universe`] receives a fresh version, so caches keyed on it are invalidated on reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniverseVersion(u64);

impl Display for UniverseVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "v{}", self.0)
    }
}

/// The immutable set of agencies everything else is computed against.
///
/// Agencies are kept in load order, which is also the tie-break order for equal similarity distances.
#[derive(Debug)]
pub struct Universe {
    agencies: Vec<Agency>,
    index: HashMap<AgencyId, usize>,
    version: UniverseVersion,
}

impl Universe {
    /// Build a universe, rejecting duplicate agency identifiers.
    pub fn new(agencies: Vec<Agency>) -> Result<Self, RankingError> {
        let mut index = HashMap::with_capacity(agencies.len());
        for (position, agency) in agencies.iter().enumerate() {
            if index.insert(agency.id, position).is_some() {
                return Err(RankingError::DuplicateAgency(agency.id));
            }
        }

        Ok(Self {
            agencies,
            index,
            version: UniverseVersion(NEXT_VERSION.fetch_add(1, Ordering::Relaxed)),
        })
    }

    #[must_use]
    pub fn agencies(&self) -> &[Agency] {
        &self.agencies
    }

    #[must_use]
    pub fn get(&self, id: AgencyId) -> Option<&Agency> {
        self.index.get(&id).and_then(|&position| self.agencies.get(position))
    }

    /// Like [`Self::get`], but an unknown identifier is an error.
    pub fn require(&self, id: AgencyId) -> Result<&Agency, RankingError> {
        self.get(id).ok_or(RankingError::AgencyNotFound(id))
    }

    #[must_use]
    pub fn contains(&self, id: AgencyId) -> bool {
        self.index.contains_key(&id)
    }

    /// Load-order position of an agency.
    #[must_use]
    pub fn position(&self, id: AgencyId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.agencies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agencies.is_empty()
    }

    #[must_use]
    pub const fn version(&self) -> UniverseVersion {
        self.version
    }

    #[must_use]
    pub fn categories(&self) -> Categories {
        Categories::from_agencies(&self.agencies)
    }
}

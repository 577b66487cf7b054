//! Categorical narrowing of the candidate universe.

use crate::dataset::{Agency, AgencyId, ModeCode, Universe};
use crate::metrics::SizeBand;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The active filter selections.
///
/// Every predicate is a no-op while its selection is empty. Active predicates are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
    /// Accepted reporter types; an agency needs any one of them.
    pub reporter_types: HashSet<String>,

    /// Accepted organization types; an agency needs any one of them.
    pub organization_types: HashSet<String>,

    /// Required modes; an agency must operate all of them.
    pub modes: HashSet<ModeCode>,

    /// Accepted states; an agency needs to be in any one of them.
    pub states: HashSet<String>,

    /// Accepted ridership bands.
    pub ridership_bands: HashSet<SizeBand>,

    /// Accepted population bands. Agencies without a population match none of them.
    pub population_bands: HashSet<SizeBand>,

    /// Case-insensitive text matched against agency name, city and urbanized area name.
    pub search: String,
}

impl FilterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_reporter_types<S: Into<String>>(mut self, types: impl IntoIterator<Item = S>) -> Self {
        self.reporter_types = types.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_organization_types<S: Into<String>>(mut self, types: impl IntoIterator<Item = S>) -> Self {
        self.organization_types = types.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_modes<M: Into<ModeCode>>(mut self, modes: impl IntoIterator<Item = M>) -> Self {
        self.modes = modes.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_states<S: Into<String>>(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.states = states.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_ridership_bands(mut self, bands: impl IntoIterator<Item = SizeBand>) -> Self {
        self.ridership_bands = bands.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_population_bands(mut self, bands: impl IntoIterator<Item = SizeBand>) -> Self {
        self.population_bands = bands.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// True when no predicate is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reporter_types.is_empty()
            && self.organization_types.is_empty()
            && self.modes.is_empty()
            && self.states.is_empty()
            && self.ridership_bands.is_empty()
            && self.population_bands.is_empty()
            && self.search_term().is_none()
    }

    /// Whether an agency passes every active predicate.
    #[must_use]
    pub fn matches(&self, agency: &Agency) -> bool {
        self.matches_with(agency, self.search_term().as_deref())
    }

    fn matches_with(&self, agency: &Agency, needle: Option<&str>) -> bool {
        any_of(&self.reporter_types, &agency.reporter_type)
            && any_of(&self.organization_types, &agency.organization_type)
            && any_of(&self.states, &agency.state)
            && agency.modes.is_superset(&self.modes)
            && (self.ridership_bands.is_empty() || self.ridership_bands.iter().any(|b| b.contains_ridership(agency.ridership)))
            && (self.population_bands.is_empty()
                || agency
                    .population
                    .is_some_and(|p| self.population_bands.iter().any(|b| b.contains_population(p))))
            && needle.is_none_or(|needle| matches_search(agency, needle))
    }

    /// The lower-cased search term, or `None` when blank.
    fn search_term(&self) -> Option<String> {
        let term = self.search.trim();
        (!term.is_empty()).then(|| term.to_lowercase())
    }
}

fn any_of(accepted: &HashSet<String>, value: &str) -> bool {
    accepted.is_empty() || accepted.contains(value)
}

fn matches_search(agency: &Agency, needle: &str) -> bool {
    let hit = |text: &str| text.to_lowercase().contains(needle);
    hit(&agency.name) || hit(&agency.city) || agency.uza_name.as_deref().is_some_and(hit)
}

/// Agencies eligible for ranking against `home`: everything passing the filters, minus the home agency itself.
///
/// Candidates are returned in universe order.
#[must_use]
pub fn filter_candidates<'a>(universe: &'a Universe, home: AgencyId, filters: &FilterSet) -> Vec<&'a Agency> {
    let needle = filters.search_term();
    universe
        .agencies()
        .iter()
        .filter(|agency| agency.id != home && filters.matches_with(agency, needle.as_deref()))
        .collect()
}

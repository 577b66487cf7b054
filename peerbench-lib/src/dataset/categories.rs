use super::{Agency, ModeCode};
use std::collections::BTreeSet;

/// The choices available to each categorical filter, derived from the agency universe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories {
    pub reporter_types: BTreeSet<String>,
    pub organization_types: BTreeSet<String>,
    pub states: BTreeSet<String>,
    pub uza_names: BTreeSet<String>,
    pub modes: BTreeSet<ModeCode>,
}

impl Categories {
    #[must_use]
    pub fn from_agencies<'a>(agencies: impl IntoIterator<Item = &'a Agency>) -> Self {
        let mut categories = Self::default();
        for agency in agencies {
            insert_non_empty(&mut categories.reporter_types, &agency.reporter_type);
            insert_non_empty(&mut categories.organization_types, &agency.organization_type);
            insert_non_empty(&mut categories.states, &agency.state);
            if let Some(uza_name) = &agency.uza_name {
                insert_non_empty(&mut categories.uza_names, uza_name);
            }
            categories.modes.extend(agency.modes.iter().cloned());
        }

        categories
    }
}

fn insert_non_empty(set: &mut BTreeSet<String>, value: &str) {
    if !value.is_empty() && !set.contains(value) {
        let _ = set.insert(value.to_string());
    }
}

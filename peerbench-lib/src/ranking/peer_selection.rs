//! The bounded set of peers chosen for comparison.

use crate::dataset::AgencyId;
use std::collections::BTreeSet;

/// Maximum number of peers alongside the home agency.
pub const MAX_PEERS: usize = 19;

/// What a [`PeerSelection::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,

    /// The selection was full, or the identifier was the home agency.
    Rejected,
}

/// Peers selected for comparison with a home agency.
///
/// Never contains the home agency and never holds more than [`MAX_PEERS`] identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerSelection {
    home: AgencyId,
    peers: BTreeSet<AgencyId>,
}

impl PeerSelection {
    #[must_use]
    pub const fn new(home: AgencyId) -> Self {
        Self {
            home,
            peers: BTreeSet::new(),
        }
    }

    #[must_use]
    pub const fn home(&self) -> AgencyId {
        self.home
    }

    /// Remove `id` if selected, otherwise add it when there is room.
    pub fn toggle(&mut self, id: AgencyId) -> SelectionChange {
        if self.peers.remove(&id) {
            return SelectionChange::Removed;
        }

        if id == self.home || self.is_full() {
            return SelectionChange::Rejected;
        }

        let _ = self.peers.insert(id);
        SelectionChange::Added
    }

    /// Replace the selection with the first `n` ranked identifiers, capped at [`MAX_PEERS`].
    pub fn select_top_n(&mut self, n: usize, ranked: impl IntoIterator<Item = AgencyId>) {
        let limit = n.min(MAX_PEERS);
        let home = self.home;

        self.peers.clear();
        for id in ranked.into_iter().filter(|&id| id != home) {
            if self.peers.len() >= limit {
                break;
            }
            let _ = self.peers.insert(id);
        }
    }

    pub fn clear(&mut self) {
        self.peers.clear();
    }

    /// Switch to a new home agency, dropping it from the peers if it was one.
    pub fn rehome(&mut self, home: AgencyId) {
        self.home = home;
        let _ = self.peers.remove(&home);
    }

    #[must_use]
    pub fn contains(&self, id: AgencyId) -> bool {
        self.peers.contains(&id)
    }

    /// Selected peers in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = AgencyId> + '_ {
        self.peers.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.peers.len() >= MAX_PEERS
    }
}

//! Peer filtering and similarity ranking.
//!
//! The flow is: [`filter_candidates`] narrows the universe by categorical predicates, [`normalize`] scales each
//! criterion over the whole universe, [`rank_by_similarity`] orders candidates by distance to the home agency,
//! and [`PeerSelection`] holds the bounded set of peers the analyst picks. [`RankingPipeline`] ties these together.

mod filter_set;
mod normalizer;
mod peer_selection;
mod pipeline;
mod ranking_error;
mod scorer;
mod tie_break;

pub use filter_set::{FilterSet, filter_candidates};
pub use normalizer::{Normalization, NormalizedValues, normalize};
pub use peer_selection::{MAX_PEERS, PeerSelection, SelectionChange};
pub use pipeline::{RankingPipeline, rank_candidates};
pub use ranking_error::RankingError;
pub use scorer::{RankedCandidate, distance, rank_by_similarity, rank_by_similarity_with};
pub use tie_break::TieBreak;

//! Vendor discovery and ranking.
//!
//! The entry point is [`VendorRanker::rank`]: free-text query plus a
//! geographic point in, a capped, deterministically-ordered list of
//! [`RankedResult`]s out. Textual relevance (vendor-name and menu-item
//! matches, widened by the [`expansion`] table) dominates the score;
//! distance acts as a soft preference and tie-breaker.
//!
//! The engine never touches a database directly — candidates and menus come
//! from a [`CandidateStore`], and the distance attached to each candidate is
//! trusted as-is. No geodesic math happens here.

pub mod expansion;
mod ranking;
mod store;

use thiserror::Error;

pub use ranking::{MatchingItem, RankedResult, VendorRanker, MAX_RESULTS};
pub use store::{CandidateMenuItem, CandidateStore, StoreError, VendorCandidate};

#[derive(Debug, Error)]
pub enum SearchError {
    /// Rejected before any store access: bad coordinates or a non-positive
    /// limit. The only input the engine silently corrects is a limit above
    /// the system maximum, which is capped.
    #[error("invalid search input: {0}")]
    InvalidInput(String),

    /// The record store failed. The whole ranking call fails with it — no
    /// partial results, no retry; discovery reads are safely re-issuable by
    /// the caller.
    #[error(transparent)]
    Store(#[from] StoreError),
}

//! Proxy selection
//!
//! The selector hands out one proxy per request and keeps track of proxies
//! reported as failed so they are skipped until their failure mark lapses.

mod failure_aware;

pub use failure_aware::FailureAwareSelector;

use std::time::Instant;

use crate::models::{Selection, SelectorSnapshot};

/// Trait for proxy selection strategies
///
/// All operations are total: a selector with nothing to offer returns
/// [`Selection::Direct`] rather than an error.
pub trait ProxySelector: Send + Sync {
    /// Select a proxy as of now
    fn select(&self) -> Selection {
        self.select_at(Instant::now())
    }

    /// Select a proxy as of `now`
    ///
    /// Failure marks older than the TTL are dropped first. The result is
    /// drawn uniformly from the pool members that are still not excluded,
    /// independently on every call. Returns [`Selection::Direct`] when
    /// every member is excluded.
    fn select_at(&self, now: Instant) -> Selection;

    /// Exclude `candidate` from selection until the TTL passes after `now`
    ///
    /// Marking an already excluded candidate restarts its window rather
    /// than extending it. Expired marks are dropped as part of the same
    /// operation. Candidates outside the pool are accepted and never affect
    /// selection.
    fn mark_failed(&self, candidate: &str, now: Instant);

    /// Current pool and exclusion state as of `now`
    ///
    /// Expired marks are dropped before the snapshot is taken.
    fn snapshot_at(&self, now: Instant) -> SelectorSnapshot;

    /// Get the strategy name
    fn strategy_name(&self) -> &'static str;
}

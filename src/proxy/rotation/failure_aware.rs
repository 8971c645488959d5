//! Random selection that skips recently failed proxies
//!
//! Failure marks expire lazily: every selection and every failure report
//! first sweeps the whole exclusion map, so the cost is proportional to the
//! number of excluded entries. That is fine for a handful of entries; a
//! large pool would want a min-heap or timer wheel keyed on expiry instead.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::Utc;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::ProxySelector;
use crate::config::DEFAULT_FAILURE_TTL;
use crate::models::{ExcludedProxy, Selection, SelectorSnapshot};

/// Mutable selector state, guarded by a single lock
struct SelectorState {
    /// Candidate URL -> time it was last reported as failed
    excluded: HashMap<String, Instant>,
    rng: StdRng,
}

impl SelectorState {
    /// Drop every mark older than `ttl` as of `now`
    fn sweep(&mut self, now: Instant, ttl: Duration) {
        self.excluded
            .retain(|_, failed_at| now.saturating_duration_since(*failed_at) <= ttl);
    }
}

/// Picks a uniformly random proxy from a fixed pool, excluding proxies
/// reported as failed within the last `ttl`.
pub struct FailureAwareSelector {
    pool: Vec<String>,
    ttl: Duration,
    state: Mutex<SelectorState>,
}

impl FailureAwareSelector {
    pub fn new(pool: Vec<String>, ttl: Duration) -> Self {
        Self::with_rng(pool, ttl, StdRng::from_entropy())
    }

    /// Deterministic draws for a given seed
    pub fn with_seed(pool: Vec<String>, ttl: Duration, seed: u64) -> Self {
        Self::with_rng(pool, ttl, StdRng::seed_from_u64(seed))
    }

    /// Selector using the default five minute failure TTL
    pub fn with_default_ttl(pool: Vec<String>) -> Self {
        Self::new(pool, DEFAULT_FAILURE_TTL)
    }

    fn with_rng(pool: Vec<String>, ttl: Duration, rng: StdRng) -> Self {
        Self {
            pool,
            ttl,
            state: Mutex::new(SelectorState {
                excluded: HashMap::new(),
                rng,
            }),
        }
    }
}

impl ProxySelector for FailureAwareSelector {
    fn select_at(&self, now: Instant) -> Selection {
        let mut guard = self.state.lock();
        guard.sweep(now, self.ttl);

        let state = &mut *guard;
        let available: Vec<&String> = self
            .pool
            .iter()
            .filter(|candidate| !state.excluded.contains_key(candidate.as_str()))
            .collect();

        match available.choose(&mut state.rng) {
            Some(candidate) => Selection::Proxy((*candidate).clone()),
            None => Selection::Direct,
        }
    }

    fn mark_failed(&self, candidate: &str, now: Instant) {
        let mut state = self.state.lock();
        state.sweep(now, self.ttl);
        state.excluded.insert(candidate.to_string(), now);
    }

    fn snapshot_at(&self, now: Instant) -> SelectorSnapshot {
        let mut state = self.state.lock();
        state.sweep(now, self.ttl);

        let wall_now = Utc::now();
        let mut excluded: Vec<ExcludedProxy> = state
            .excluded
            .iter()
            .map(|(url, failed_at)| {
                let age = now.saturating_duration_since(*failed_at);
                let age = chrono::Duration::from_std(age).unwrap_or_else(|_| chrono::Duration::zero());
                ExcludedProxy {
                    url: url.clone(),
                    failed_at: wall_now - age,
                    expires_in_secs: failed_at
                        .checked_add(self.ttl)
                        .map(|expiry| expiry.saturating_duration_since(now).as_secs())
                        .unwrap_or(self.ttl.as_secs()),
                }
            })
            .collect();
        excluded.sort_by(|a, b| a.url.cmp(&b.url));

        let available = self
            .pool
            .iter()
            .filter(|candidate| !state.excluded.contains_key(candidate.as_str()))
            .count();

        SelectorSnapshot {
            pool_size: self.pool.len(),
            available,
            ttl_secs: self.ttl.as_secs(),
            excluded,
        }
    }

    fn strategy_name(&self) -> &'static str {
        "failure_aware_random"
    }
}

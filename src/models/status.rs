use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate currently excluded from selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedProxy {
    pub url: String,
    /// Wall-clock time of the most recent failure report
    pub failed_at: DateTime<Utc>,
    /// Seconds until the failure mark lapses
    pub expires_in_secs: u64,
}

/// Point-in-time view of selector state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSnapshot {
    pub pool_size: usize,
    pub available: usize,
    pub ttl_secs: u64,
    /// Sorted by URL
    pub excluded: Vec<ExcludedProxy>,
}

/// Body of `GET /status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub strategy: String,
    pub uptime_secs: u64,
    #[serde(flatten)]
    pub selector: SelectorSnapshot,
}

//! Proxy Picker - Failure-Aware Proxy Selection
//!
//! Hands out one proxy URL from a fixed pool per request, skipping proxies
//! that were recently reported as failed.
//!
//! ## Features
//!
//! - Uniform random selection among available proxies
//! - Failure marks that lapse after a TTL (five minutes by default)
//! - `direct` fallback when every proxy is excluded
//! - HTTP API built on axum, plus a small client for callers

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod proxy;

pub use client::SelectorClient;
pub use config::Config;
pub use error::{PickerError, Result};
pub use models::Selection;
pub use proxy::{FailureAwareSelector, ProxySelector};

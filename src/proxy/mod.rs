//! Proxy pool management
//!
//! This module provides failure-aware proxy selection over a fixed pool.

pub mod rotation;

pub use rotation::{FailureAwareSelector, ProxySelector};

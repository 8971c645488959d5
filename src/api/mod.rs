//! HTTP API
//!
//! Exposes proxy selection and failure reporting, plus health and status
//! endpoints.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

pub use server::{ApiServer, AppState};

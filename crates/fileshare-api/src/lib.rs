//! # fileshare-api
//!
//! HTTP API layer for FileShare built on Axum.
//!
//! Provides the REST endpoints, middleware (request logging, CORS, body
//! limit, tracing), request extractors and DTOs.

pub mod app;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;

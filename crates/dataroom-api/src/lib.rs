//! # dataroom-api
//!
//! HTTP API layer for DataRoom built on Axum.
//!
//! Provides the folder, document and health endpoints, the bearer-token
//! extractor, middleware (CORS, request logging, request timeout), DTOs,
//! and the mapping from domain errors to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;

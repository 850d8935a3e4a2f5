//! Custom Axum extractors.

pub mod auth;
pub mod request;

pub use auth::AuthUser;
pub use request::{ApiJson, ApiPath, ApiQuery};

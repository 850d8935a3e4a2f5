//! # dataroom-auth
//!
//! Identity provider for DataRoom. Turns a bearer token into an
//! [`Identity`] (user ID, username, role) or an authentication failure.
//!
//! ## Modules
//!
//! - `jwt` — JWT token creation and validation
//! - `identity` — the `IdentityProvider` seam consumed by the HTTP layer

pub mod identity;
pub mod jwt;

pub use identity::{Identity, IdentityProvider, JwtIdentityProvider};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};

//! Identity resolution for incoming requests.

use async_trait::async_trait;
use tracing::debug;

use dataroom_core::config::AuthConfig;
use dataroom_core::error::AppError;
use dataroom_core::types::UserId;
use dataroom_entity::user::UserRole;

use crate::jwt::JwtDecoder;

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The caller's user ID.
    pub user_id: UserId,
    /// The caller's username.
    pub username: String,
    /// The caller's role.
    pub role: UserRole,
}

/// Resolves a bearer credential to an [`Identity`].
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Authenticate a raw bearer token. Fails with an authentication error.
    async fn authenticate(&self, token: &str) -> Result<Identity, AppError>;
}

/// Identity provider backed by signed JWT access tokens.
#[derive(Debug, Clone)]
pub struct JwtIdentityProvider {
    decoder: JwtDecoder,
}

impl JwtIdentityProvider {
    /// Create a provider from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            decoder: JwtDecoder::new(config),
        }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn authenticate(&self, token: &str) -> Result<Identity, AppError> {
        let claims = self.decoder.decode_access_token(token)?;
        debug!(user_id = %claims.sub, role = %claims.role, "Authenticated bearer token");

        Ok(Identity {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
        })
    }
}

//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dataroom_auth::Identity;
use dataroom_core::types::UserId;
use dataroom_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built from the resolved [`Identity`] by the HTTP layer and passed into
/// every service method so that each operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The user's role at the time the token was issued.
    pub role: UserRole,
    /// The username (convenience field from token claims).
    pub username: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, role: UserRole, username: String) -> Self {
        Self {
            user_id,
            role,
            username,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether the caller may modify a record owned by `owner`.
    ///
    /// Owners and admins only.
    pub fn can_modify(&self, owner: UserId) -> bool {
        self.is_admin() || self.user_id == owner
    }
}

impl From<Identity> for RequestContext {
    fn from(identity: Identity) -> Self {
        Self::new(identity.user_id, identity.role, identity.username)
    }
}

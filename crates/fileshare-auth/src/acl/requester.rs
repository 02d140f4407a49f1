//! The authenticated identity behind a request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fileshare_entity::user::{User, UserPermission, UserRole};

/// An authenticated user as seen by the access policy.
///
/// Anonymous visitors have no `Requester`; policy functions take
/// `Option<&Requester>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    /// The user's id.
    pub user_id: Uuid,
    /// The user's login name.
    pub username: String,
    /// Account role.
    pub role: UserRole,
    /// Explicit elevated permissions.
    pub permissions: Vec<UserPermission>,
}

impl Requester {
    /// Build a requester from a stored user record.
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
            permissions: user.permission_set(),
        }
    }

    /// Admins hold every permission; members only the listed ones.
    pub fn has_permission(&self, permission: UserPermission) -> bool {
        self.role.is_admin() || self.permissions.contains(&permission)
    }
}

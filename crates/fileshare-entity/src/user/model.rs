//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::permission::UserPermission;
use super::role::UserRole;
use super::status::UserStatus;

/// A user account. Accounts are provisioned by the identity provider;
/// FileShare only reads them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name, matched exactly when sharing.
    pub username: String,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// Account role.
    pub role: UserRole,
    /// Account status.
    pub status: UserStatus,
    /// Explicit elevated permissions, stored as text.
    pub permissions: Vec<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Parsed permission set. Unknown entries are skipped.
    pub fn permission_set(&self) -> Vec<UserPermission> {
        self.permissions
            .iter()
            .filter_map(|p| p.parse().ok())
            .collect()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Display name (optional).
    pub display_name: Option<String>,
    /// Assigned role.
    pub role: UserRole,
    /// Explicit permissions.
    pub permissions: Vec<UserPermission>,
}

impl CreateUser {
    /// A plain member account with no elevated permissions.
    pub fn member(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: None,
            role: UserRole::Member,
            permissions: Vec::new(),
        }
    }
}

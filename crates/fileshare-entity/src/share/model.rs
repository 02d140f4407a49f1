//! Grant entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Membership of a user in a file's private set.
///
/// One row per `(file_id, user_id)`; the pair is the primary key, so
/// granting twice leaves a single row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FileGrant {
    /// The shared file.
    pub file_id: Uuid,
    /// The user allowed to view it.
    pub user_id: Uuid,
    /// Who added the membership.
    pub granted_by: Option<Uuid>,
    /// When the membership was added.
    pub granted_at: DateTime<Utc>,
}

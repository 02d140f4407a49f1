//! Private member set repository.
//!
//! Every mutation is a single statement, so a concurrent grant and revoke
//! on the same file cannot lose an update.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use fileshare_core::error::{AppError, ErrorKind};
use fileshare_core::result::AppResult;
use fileshare_entity::user::User;

use crate::store::GrantStore;

/// Repository for `file_private_users`.
#[derive(Debug, Clone)]
pub struct GrantRepository {
    pool: PgPool,
}

impl GrantRepository {
    /// Create a new grant repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GrantStore for GrantRepository {
    async fn add(&self, file_id: Uuid, user_id: Uuid, granted_by: Option<Uuid>) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO file_private_users (file_id, user_id, granted_by) \
             VALUES ($1, $2, $3) ON CONFLICT (file_id, user_id) DO NOTHING",
        )
        .bind(file_id)
        .bind(user_id)
        .bind(granted_by)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to grant access", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, file_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM file_private_users WHERE file_id = $1 AND user_id = $2")
                .bind(file_id)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to revoke access", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    async fn member_ids(&self, file_id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM file_private_users WHERE file_id = $1")
            .bind(file_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load file members", e)
            })
    }

    async fn list_members(&self, file_id: Uuid) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT u.* FROM users u \
             JOIN file_private_users g ON g.user_id = u.id \
             WHERE g.file_id = $1 ORDER BY u.username ASC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list file members", e))
    }
}

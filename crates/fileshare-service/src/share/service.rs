//! Grant and revoke private visibility.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use fileshare_auth::{AccessChecker, FileAction};
use fileshare_core::error::AppError;
use fileshare_core::result::AppResult;
use fileshare_database::store::{FileStore, GrantStore, UserStore};
use fileshare_entity::file::File;
use fileshare_entity::user::User;

use super::error::ShareError;
use crate::context::RequestContext;

/// Result of a successful grant.
#[derive(Debug, Clone, Serialize)]
pub struct GrantOutcome {
    /// The member's username.
    pub username: String,
    /// The member's id.
    pub user_id: Uuid,
    /// `false` if the user was already a member.
    pub added: bool,
}

/// Manages the per-file private member sets.
#[derive(Clone)]
pub struct ShareService {
    files: Arc<dyn FileStore>,
    users: Arc<dyn UserStore>,
    grants: Arc<dyn GrantStore>,
    checker: AccessChecker,
}

impl std::fmt::Debug for ShareService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareService").finish()
    }
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        files: Arc<dyn FileStore>,
        users: Arc<dyn UserStore>,
        grants: Arc<dyn GrantStore>,
    ) -> Self {
        Self {
            checker: AccessChecker::new(grants.clone()),
            files,
            users,
            grants,
        }
    }

    /// Parse a client-supplied file id.
    pub fn parse_file_id(raw: Option<&str>) -> Result<Uuid, ShareError> {
        let raw = raw.map(str::trim).unwrap_or_default();
        Uuid::parse_str(raw).map_err(|_| ShareError::InvalidFileId(raw.to_string()))
    }

    /// Add the user named `username` to the file's private set.
    ///
    /// Granting an existing member succeeds with `added = false`.
    pub async fn grant(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        username: &str,
    ) -> Result<GrantOutcome, ShareError> {
        let username = username.trim();
        let user = match username {
            "" => None,
            name => self.users.find_by_username(name).await?,
        }
        .ok_or_else(|| ShareError::UserNotFound(username.to_string()))?;

        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or(ShareError::FileNotFound(file_id))?;
        self.checker
            .require_modify(&file, ctx.requester(), FileAction::Change)?;

        let added = self.grants.add(file.id, user.id, ctx.user_id()).await?;

        info!(
            granted_by = ?ctx.user_id(),
            file_id = %file.id,
            user_id = %user.id,
            added,
            "Private access granted"
        );

        Ok(GrantOutcome {
            username: user.username,
            user_id: user.id,
            added,
        })
    }

    /// Remove `user_id` from the file's private set.
    ///
    /// Returns whether the user was a member.
    pub async fn revoke(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<bool> {
        let file = self.find_file(file_id).await?;
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found("User not found"));
        }
        self.checker
            .require_modify(&file, ctx.requester(), FileAction::Change)?;

        let removed = self.grants.remove(file.id, user_id).await?;

        info!(
            revoked_by = ?ctx.user_id(),
            file_id = %file.id,
            user_id = %user_id,
            removed,
            "Private access revoked"
        );

        Ok(removed)
    }

    /// Users in the file's private set. Requires change rights on the file.
    pub async fn members(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<Vec<User>> {
        let file = self.find_file(file_id).await?;
        self.checker
            .require_modify(&file, ctx.requester(), FileAction::Change)?;
        self.grants.list_members(file.id).await
    }

    async fn find_file(&self, file_id: Uuid) -> AppResult<File> {
        self.files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }
}

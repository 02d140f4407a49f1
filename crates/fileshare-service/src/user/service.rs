//! Public user profiles.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use fileshare_core::error::AppError;
use fileshare_core::result::AppResult;
use fileshare_core::types::pagination::{PageRequest, PageResponse};
use fileshare_database::store::{FileStore, UserStore};
use fileshare_entity::file::File;
use fileshare_entity::user::User;

/// A user together with the first page of their public uploads.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    /// The user.
    pub user: User,
    /// Their public files, newest first.
    pub files: PageResponse<File>,
}

/// Read-only access to user profiles.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    files: Arc<dyn FileStore>,
    page_size: u64,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish()
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>, files: Arc<dyn FileStore>, page_size: u64) -> Self {
        Self {
            users,
            files,
            page_size,
        }
    }

    /// Gets a user's public profile.
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<UserProfile> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        let files = self
            .files
            .find_public_by_author(user.id, &PageRequest::new(1, self.page_size))
            .await?;
        Ok(UserProfile { user, files })
    }
}

//! Store traits consumed by the service layer.
//!
//! Query construction stays behind these named methods; services never
//! see SQL. Both [`crate::repositories`] (PostgreSQL) and
//! [`crate::memory::MemoryStore`] implement every trait.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use fileshare_core::result::AppResult;
use fileshare_core::types::pagination::{PageRequest, PageResponse};
use fileshare_entity::file::{CreateFile, File, UpdateFile};
use fileshare_entity::user::{CreateUser, User};

/// Persistence of file records.
#[async_trait]
pub trait FileStore: Send + Sync + 'static {
    /// Find a file by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>>;

    /// Public files whose name contains `query` (case-insensitive),
    /// newest first. `None` matches every public file.
    async fn find_public_by_name(
        &self,
        query: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<File>>;

    /// Public files uploaded by `author_id`, newest first.
    async fn find_public_by_author(
        &self,
        author_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<File>>;

    /// Insert a new file record.
    async fn create(&self, data: &CreateFile) -> AppResult<File>;

    /// Apply an edit. Returns `None` if the file no longer exists.
    async fn update(&self, id: Uuid, data: &UpdateFile) -> AppResult<Option<File>>;

    /// Delete a file record and its grants. Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Check that the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Read access to user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a user account.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;
}

/// The per-file private member sets.
#[async_trait]
pub trait GrantStore: Send + Sync + 'static {
    /// Add `user_id` to the file's private set. Returns `false` if the user
    /// was already a member. Atomic; concurrent calls never duplicate rows.
    async fn add(&self, file_id: Uuid, user_id: Uuid, granted_by: Option<Uuid>) -> AppResult<bool>;

    /// Remove `user_id` from the file's private set. Returns `false` if the
    /// user was not a member.
    async fn remove(&self, file_id: Uuid, user_id: Uuid) -> AppResult<bool>;

    /// Ids of every user in the file's private set.
    async fn member_ids(&self, file_id: Uuid) -> AppResult<Vec<Uuid>>;

    /// Users in the file's private set, ordered by username.
    async fn list_members(&self, file_id: Uuid) -> AppResult<Vec<User>>;
}

/// The set of stores a running service uses.
#[derive(Clone)]
pub struct Stores {
    /// File records.
    pub files: Arc<dyn FileStore>,
    /// User accounts.
    pub users: Arc<dyn UserStore>,
    /// Private member sets.
    pub grants: Arc<dyn GrantStore>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}

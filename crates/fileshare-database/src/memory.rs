//! In-memory entity store.
//!
//! Backs development servers (`database.backend = "memory"`) and tests.
//! All state sits behind one `RwLock`, so each trait method is atomic
//! with respect to the others.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use fileshare_core::error::AppError;
use fileshare_core::result::AppResult;
use fileshare_core::types::pagination::{PageRequest, PageResponse};
use fileshare_entity::file::{CreateFile, File, UpdateFile};
use fileshare_entity::share::FileGrant;
use fileshare_entity::user::{CreateUser, User, UserStatus};

use crate::store::{FileStore, GrantStore, Stores, UserStore};

#[derive(Debug, Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    files: HashMap<Uuid, File>,
    grants: BTreeMap<(Uuid, Uuid), FileGrant>,
}

/// Process-local implementation of every store trait.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expose this store through the trait objects the services use.
    pub fn stores(&self) -> Stores {
        Stores {
            files: Arc::new(self.clone()),
            users: Arc::new(self.clone()),
            grants: Arc::new(self.clone()),
        }
    }

    /// Insert a fully-formed file record, keeping its timestamps.
    pub async fn insert_file(&self, file: File) {
        self.state.write().await.files.insert(file.id, file);
    }

    /// Replace a user record, keeping its id.
    pub async fn put_user(&self, user: User) {
        self.state.write().await.users.insert(user.id, user);
    }
}

/// Newest first, ties broken by id, matching the SQL ordering.
fn paginate(mut files: Vec<File>, page: &PageRequest) -> PageResponse<File> {
    files.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    let total = files.len() as u64;
    let items = files
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();
    PageResponse::new(items, page.page, page.page_size, total)
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        Ok(self.state.read().await.files.get(&id).cloned())
    }

    async fn find_public_by_name(
        &self,
        query: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<File>> {
        let state = self.state.read().await;
        let matches = state
            .files
            .values()
            .filter(|f| f.is_listed())
            .filter(|f| query.is_none_or(|q| f.name_contains(q)))
            .cloned()
            .collect();
        Ok(paginate(matches, page))
    }

    async fn find_public_by_author(
        &self,
        author_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<File>> {
        let state = self.state.read().await;
        let matches = state
            .files
            .values()
            .filter(|f| f.is_listed() && f.is_authored_by(author_id))
            .cloned()
            .collect();
        Ok(paginate(matches, page))
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        let mut state = self.state.write().await;
        if state.files.contains_key(&data.id) {
            return Err(AppError::conflict(format!("File {} already exists", data.id)));
        }
        if let Some(author_id) = data.author_id {
            if !state.users.contains_key(&author_id) {
                return Err(AppError::database(format!("Unknown author {author_id}")));
            }
        }

        let now = Utc::now();
        let file = File {
            id: data.id,
            name: data.name.clone(),
            author_id: data.author_id,
            access: data.access,
            storage_path: data.storage_path.clone(),
            original_filename: data.original_filename.clone(),
            mime_type: data.mime_type.clone(),
            size_bytes: data.size_bytes,
            created_at: now,
            updated_at: now,
        };
        state.files.insert(file.id, file.clone());
        Ok(file)
    }

    async fn update(&self, id: Uuid, data: &UpdateFile) -> AppResult<Option<File>> {
        let mut state = self.state.write().await;
        Ok(state.files.get_mut(&id).map(|file| {
            data.apply_to(file);
            file.updated_at = Utc::now();
            file.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let removed = state.files.remove(&id).is_some();
        if removed {
            state.grants.retain(|(file_id, _), _| *file_id != id);
        }
        Ok(removed)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.username == data.username) {
            return Err(AppError::conflict(format!(
                "Username '{}' is already taken",
                data.username
            )));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: data.username.clone(),
            display_name: data.display_name.clone(),
            role: data.role,
            status: UserStatus::Active,
            permissions: data
                .permissions
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            created_at: Utc::now(),
        };
        debug!(user_id = %user.id, username = %user.username, "Created in-memory user");
        state.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl GrantStore for MemoryStore {
    async fn add(&self, file_id: Uuid, user_id: Uuid, granted_by: Option<Uuid>) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if !state.files.contains_key(&file_id) || !state.users.contains_key(&user_id) {
            return Err(AppError::database("Grant references a missing file or user"));
        }
        if state.grants.contains_key(&(file_id, user_id)) {
            return Ok(false);
        }
        state.grants.insert(
            (file_id, user_id),
            FileGrant {
                file_id,
                user_id,
                granted_by,
                granted_at: Utc::now(),
            },
        );
        Ok(true)
    }

    async fn remove(&self, file_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        Ok(self
            .state
            .write()
            .await
            .grants
            .remove(&(file_id, user_id))
            .is_some())
    }

    async fn member_ids(&self, file_id: Uuid) -> AppResult<Vec<Uuid>> {
        let state = self.state.read().await;
        Ok(state
            .grants
            .values()
            .filter(|grant| grant.file_id == file_id)
            .map(|grant| grant.user_id)
            .collect())
    }

    async fn list_members(&self, file_id: Uuid) -> AppResult<Vec<User>> {
        let state = self.state.read().await;
        let mut members: Vec<User> = state
            .grants
            .values()
            .filter(|grant| grant.file_id == file_id)
            .filter_map(|grant| state.users.get(&grant.user_id).cloned())
            .collect();
        members.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(members)
    }
}

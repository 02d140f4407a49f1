//! File detail, download, edit and delete.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use fileshare_auth::{AccessChecker, FileAction, can_modify};
use fileshare_core::config::StorageConfig;
use fileshare_core::error::AppError;
use fileshare_core::result::AppResult;
use fileshare_core::traits::storage::{ByteStream, StorageProvider};
use fileshare_database::store::{FileStore, GrantStore, UserStore};
use fileshare_entity::file::{File, UpdateFile};
use fileshare_entity::user::User;

use super::form::EditFileForm;
use super::upload::{discard_blob, store_blob};
use crate::context::RequestContext;

/// A file as shown on its detail page.
#[derive(Debug, Clone, Serialize)]
pub struct FileDetail {
    /// The file record.
    pub file: File,
    /// The uploader, if the file has one.
    pub author: Option<User>,
    /// The private set. Only present for requesters who may change the file.
    pub members: Option<Vec<User>>,
    /// Whether the requester may change the file.
    pub can_modify: bool,
}

/// Per-file operations gated by the access policy.
#[derive(Clone)]
pub struct FileService {
    files: Arc<dyn FileStore>,
    users: Arc<dyn UserStore>,
    grants: Arc<dyn GrantStore>,
    checker: AccessChecker,
    storage: Arc<dyn StorageProvider>,
    config: StorageConfig,
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService").finish()
    }
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        files: Arc<dyn FileStore>,
        users: Arc<dyn UserStore>,
        grants: Arc<dyn GrantStore>,
        storage: Arc<dyn StorageProvider>,
        config: StorageConfig,
    ) -> Self {
        Self {
            checker: AccessChecker::new(grants.clone()),
            files,
            users,
            grants,
            storage,
            config,
        }
    }

    async fn find(&self, file_id: Uuid) -> AppResult<File> {
        self.files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Gets a file the requester may view.
    pub async fn get_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<FileDetail> {
        let file = self.find(file_id).await?;
        self.checker.require_view(&file, ctx.requester()).await?;

        let author = match file.author_id {
            Some(author_id) => self.users.find_by_id(author_id).await?,
            None => None,
        };
        let may_modify = can_modify(&file, ctx.requester(), FileAction::Change);
        let members = if may_modify {
            Some(self.grants.list_members(file.id).await?)
        } else {
            None
        };

        Ok(FileDetail {
            file,
            author,
            members,
            can_modify: may_modify,
        })
    }

    /// Opens the blob of a file the requester may view.
    pub async fn download(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> AppResult<(File, ByteStream)> {
        let file = self.find(file_id).await?;
        self.checker.require_view(&file, ctx.requester()).await?;
        let stream = self.storage.read(&file.storage_path).await?;
        Ok((file, stream))
    }

    /// Edits a file's name, access or blob.
    ///
    /// A replacement blob is written before the record changes; the old
    /// blob is removed afterwards.
    pub async fn update_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        form: EditFileForm,
    ) -> AppResult<File> {
        let file = self.find(file_id).await?;
        self.checker
            .require_modify(&file, ctx.requester(), FileAction::Change)?;
        form.validate_with_limit(self.config.max_upload_size_bytes)?;

        let access = form.access_level()?;
        let blob = match &form.file {
            Some(upload) => Some(store_blob(self.storage.as_ref(), upload).await?),
            None => None,
        };
        let new_path = blob.as_ref().map(|b| b.storage_path.clone());
        let update = UpdateFile {
            name: form.name,
            access,
            blob,
        };
        if update.is_empty() {
            return Ok(file);
        }

        let updated = match self.files.update(file_id, &update).await {
            Ok(Some(updated)) => updated,
            Ok(None) => {
                if let Some(path) = &new_path {
                    discard_blob(self.storage.as_ref(), path).await;
                }
                return Err(AppError::not_found("File not found"));
            }
            Err(e) => {
                if let Some(path) = &new_path {
                    discard_blob(self.storage.as_ref(), path).await;
                }
                return Err(e);
            }
        };

        if new_path.is_some() {
            discard_blob(self.storage.as_ref(), &file.storage_path).await;
        }

        info!(
            user_id = ?ctx.user_id(),
            file_id = %file_id,
            blob_replaced = new_path.is_some(),
            "File updated"
        );

        Ok(updated)
    }

    /// Deletes a file, its private set and its blob.
    pub async fn delete_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<()> {
        let file = self.find(file_id).await?;
        self.checker
            .require_modify(&file, ctx.requester(), FileAction::Delete)?;

        if !self.files.delete(file_id).await? {
            return Err(AppError::not_found("File not found"));
        }
        discard_blob(self.storage.as_ref(), &file.storage_path).await;

        info!(user_id = ?ctx.user_id(), file_id = %file_id, "File deleted");
        Ok(())
    }
}

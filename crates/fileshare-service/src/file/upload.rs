//! File creation from an upload form.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use fileshare_core::config::StorageConfig;
use fileshare_core::error::AppError;
use fileshare_core::result::AppResult;
use fileshare_core::traits::storage::StorageProvider;
use fileshare_database::store::FileStore;
use fileshare_entity::file::{CreateFile, File, FileAccess, FileBlob};
use fileshare_storage::{blob_path, mime_from_filename};

use super::form::{FileForm, UploadedBlob};
use crate::context::RequestContext;

/// Handles new uploads.
#[derive(Clone)]
pub struct UploadService {
    files: Arc<dyn FileStore>,
    storage: Arc<dyn StorageProvider>,
    config: StorageConfig,
}

impl std::fmt::Debug for UploadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadService").finish()
    }
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        files: Arc<dyn FileStore>,
        storage: Arc<dyn StorageProvider>,
        config: StorageConfig,
    ) -> Self {
        Self {
            files,
            storage,
            config,
        }
    }

    /// Validate the form and create a file.
    ///
    /// Anonymous submitters only get the name and file fields: any access
    /// value they send is dropped, the file is public and has no author.
    pub async fn create(&self, ctx: &RequestContext, mut form: FileForm) -> AppResult<File> {
        let author_id = ctx.user_id();
        if author_id.is_none() {
            form.restrict_to_anonymous();
        }
        form.validate_with_limit(self.config.max_upload_size_bytes)?;

        let access = match author_id {
            Some(_) => form.access_level()?,
            None => FileAccess::Public,
        };
        let (Some(name), Some(upload)) = (form.name, form.file) else {
            return Err(AppError::validation("Invalid form data"));
        };

        let blob = store_blob(self.storage.as_ref(), &upload).await?;
        let data = CreateFile {
            id: Uuid::new_v4(),
            name,
            author_id,
            access,
            storage_path: blob.storage_path.clone(),
            original_filename: blob.original_filename,
            mime_type: blob.mime_type,
            size_bytes: blob.size_bytes,
        };

        let file = match self.files.create(&data).await {
            Ok(file) => file,
            Err(e) => {
                discard_blob(self.storage.as_ref(), &blob.storage_path).await;
                return Err(e);
            }
        };

        info!(
            file_id = %file.id,
            author_id = ?file.author_id,
            access = %file.access,
            size = file.size_bytes,
            "File uploaded"
        );

        Ok(file)
    }
}

/// Write an uploaded blob under a fresh key.
pub(crate) async fn store_blob(
    storage: &dyn StorageProvider,
    upload: &UploadedBlob,
) -> AppResult<FileBlob> {
    let storage_path = blob_path(Uuid::new_v4(), &upload.filename);
    storage.write(&storage_path, upload.data.clone()).await?;

    let mime_type = upload
        .content_type
        .clone()
        .filter(|ct| !ct.is_empty() && ct != "application/octet-stream")
        .or_else(|| mime_from_filename(&upload.filename));

    Ok(FileBlob {
        storage_path,
        original_filename: upload.filename.clone(),
        mime_type,
        size_bytes: upload.data.len() as i64,
    })
}

/// Delete a blob, logging instead of failing.
pub(crate) async fn discard_blob(storage: &dyn StorageProvider, path: &str) {
    if let Err(e) = storage.delete(path).await {
        warn!(path = %path, error = %e, "Failed to delete blob");
    }
}

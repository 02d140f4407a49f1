//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::access::FileAccess;

/// Maximum length of a file's display name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// An uploaded file.
///
/// The private member set lives in `file_private_users` and is loaded
/// separately (see `fileshare_entity::share`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// Display name chosen by the uploader.
    pub name: String,
    /// The uploading user; `None` for anonymous uploads. Never changes.
    pub author_id: Option<Uuid>,
    /// Visibility of the file.
    pub access: FileAccess,
    /// The path within the storage provider.
    pub storage_path: String,
    /// Name of the uploaded file as sent by the client.
    pub original_filename: String,
    /// MIME type of the blob.
    pub mime_type: Option<String>,
    /// Blob size in bytes.
    pub size_bytes: i64,
    /// When the file was uploaded. Never changes.
    pub created_at: DateTime<Utc>,
    /// When the file was last edited.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Whether the file appears in the public listing.
    pub fn is_listed(&self) -> bool {
        !self.access.is_private()
    }

    /// Case-insensitive substring match on the display name.
    ///
    /// Both sides are folded with Unicode `to_lowercase`, one character at
    /// a time: `Ä` matches `ä`, but `SS` does not match `ß`. The Postgres
    /// backend uses `ILIKE`, which follows the database collation, so
    /// non-ASCII names may match differently there.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Whether `user_id` uploaded this file.
    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == Some(user_id)
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// Pre-allocated identifier (the blob is stored under it).
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Uploading user, if authenticated.
    pub author_id: Option<Uuid>,
    /// Visibility.
    pub access: FileAccess,
    /// The path within the storage provider.
    pub storage_path: String,
    /// Client-side file name.
    pub original_filename: String,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Blob size in bytes.
    pub size_bytes: i64,
}

/// Editable fields of a file. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFile {
    /// New display name.
    pub name: Option<String>,
    /// New visibility.
    pub access: Option<FileAccess>,
    /// Replacement blob location and metadata.
    pub blob: Option<FileBlob>,
}

/// Location and metadata of a stored blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileBlob {
    /// The path within the storage provider.
    pub storage_path: String,
    /// Client-side file name.
    pub original_filename: String,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Blob size in bytes.
    pub size_bytes: i64,
}

impl UpdateFile {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.access.is_none() && self.blob.is_none()
    }

    /// Apply the changes to an in-memory file.
    pub fn apply_to(&self, file: &mut File) {
        if let Some(name) = &self.name {
            file.name = name.clone();
        }
        if let Some(access) = self.access {
            file.access = access;
        }
        if let Some(blob) = &self.blob {
            file.storage_path = blob.storage_path.clone();
            file.original_filename = blob.original_filename.clone();
            file.mime_type = blob.mime_type.clone();
            file.size_bytes = blob.size_bytes;
        }
    }
}

//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fileshare_core::types::pagination::PageResponse;
use fileshare_entity::file::{File, FileAccess};
use fileshare_entity::user::User;
use fileshare_service::file::{FileDetail, PublicListing};
use fileshare_service::share::GrantOutcome;
use fileshare_service::user::UserProfile;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// User summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Display name.
    pub display_name: Option<String>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
        }
    }
}

/// File metadata as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResponse {
    /// File ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// `public` or `private`.
    pub access: FileAccess,
    /// Uploader, null for anonymous uploads.
    pub author_id: Option<Uuid>,
    /// Client-side file name.
    pub original_filename: String,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Where to fetch the content.
    pub download_url: String,
    /// Upload time.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: DateTime<Utc>,
}

impl From<File> for FileResponse {
    fn from(file: File) -> Self {
        Self {
            download_url: format!("/api/files/{}/download", file.id),
            id: file.id,
            name: file.name,
            access: file.access,
            author_id: file.author_id,
            original_filename: file.original_filename,
            mime_type: file.mime_type,
            size_bytes: file.size_bytes,
            created_at: file.created_at,
            updated_at: file.updated_at,
        }
    }
}

/// Body of `GET /api/files`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingResponse {
    /// The active search term, null when unfiltered.
    pub search: Option<String>,
    /// The page of files.
    #[serde(flatten)]
    pub page: PageResponse<FileResponse>,
}

impl From<PublicListing> for ListingResponse {
    fn from(listing: PublicListing) -> Self {
        Self {
            search: listing.search,
            page: listing.files.map(FileResponse::from),
        }
    }
}

/// Body of `GET /api/files/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDetailResponse {
    /// File metadata.
    #[serde(flatten)]
    pub file: FileResponse,
    /// Uploader summary.
    pub author: Option<UserSummary>,
    /// Private set, present only for requesters who may change the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_users: Option<Vec<UserSummary>>,
    /// Whether the requester may edit, delete and share the file.
    pub can_modify: bool,
}

impl From<FileDetail> for FileDetailResponse {
    fn from(detail: FileDetail) -> Self {
        Self {
            file: detail.file.into(),
            author: detail.author.map(UserSummary::from),
            private_users: detail
                .members
                .map(|m| m.into_iter().map(UserSummary::from).collect()),
            can_modify: detail.can_modify,
        }
    }
}

/// Body of `GET /api/users/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
    /// The user's public uploads.
    pub files: PageResponse<FileResponse>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.user.id,
            username: profile.user.username,
            display_name: profile.user.display_name,
            created_at: profile.user.created_at,
            files: profile.files.map(FileResponse::from),
        }
    }
}

/// Successful grant. Not wrapped in [`ApiResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantResponse {
    /// Username of the new member.
    pub user: String,
    /// Id of the new member.
    pub user_id: Uuid,
    /// `false` if the user was already a member.
    pub added: bool,
}

impl From<GrantOutcome> for GrantResponse {
    fn from(outcome: GrantOutcome) -> Self {
        Self {
            user: outcome.username,
            user_id: outcome.user_id,
            added: outcome.added,
        }
    }
}

/// Failed grant lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantErrorResponse {
    /// Generic message; the precise cause is only logged.
    pub error: String,
}

/// Successful revoke. Not wrapped in [`ApiResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeResponse {
    /// Always `"200"`.
    pub status: String,
    /// Whether the user was a member.
    pub removed: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status string.
    pub status: String,
    /// Server version.
    pub version: String,
}

//! Request DTOs (query strings).

use serde::{Deserialize, Serialize};

/// Query of `GET /api/files`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingQuery {
    /// Name filter.
    pub search: Option<String>,
    /// 1-based page number; kept raw so a non-numeric page is a 404.
    pub page: Option<String>,
}

/// Query of `POST /api/access/grant`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrantQuery {
    /// Username of the user to add.
    pub search_user: Option<String>,
    /// Target file id.
    pub file_id: Option<String>,
}

/// Query of `POST /api/access/revoke`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevokeQuery {
    /// Target file id.
    pub file_id: Option<String>,
    /// User to remove.
    pub user_id: Option<String>,
}

//! Grant and revoke handlers for the private member set.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use tracing::warn;

use fileshare_core::error::AppError;
use fileshare_service::share::{ShareError, ShareService};

use crate::dto::request::{GrantQuery, RevokeQuery};
use crate::dto::response::{GrantErrorResponse, GrantResponse, RevokeResponse};
use crate::extractors::{AuthUser, parse_uuid};
use crate::state::AppState;

const GRANT_LOOKUP_FAILED: &str = "User does not exist";

/// POST /api/access/grant?search_user=&file_id=
///
/// Lookup failures of any kind answer with the same generic body.
pub async fn grant_access(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<GrantQuery>,
) -> Result<Response, AppError> {
    let result = match ShareService::parse_file_id(query.file_id.as_deref()) {
        Ok(file_id) => {
            let username = query.search_user.as_deref().unwrap_or_default();
            state.share_service.grant(&auth, file_id, username).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(outcome) => Ok(Json(GrantResponse::from(outcome)).into_response()),
        Err(e) if e.is_lookup_failure() => {
            match &e {
                ShareError::UserNotFound(name) => {
                    warn!(username = %name, "Grant failed: unknown user")
                }
                ShareError::FileNotFound(id) => warn!(file_id = %id, "Grant failed: unknown file"),
                ShareError::InvalidFileId(raw) => {
                    warn!(file_id = %raw, "Grant failed: malformed file id")
                }
                ShareError::Other(_) => {}
            }
            Ok(Json(GrantErrorResponse {
                error: GRANT_LOOKUP_FAILED.to_string(),
            })
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /api/access/revoke?file_id=&user_id=
pub async fn revoke_access(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<RevokeQuery>,
) -> Result<Json<RevokeResponse>, AppError> {
    let file_id = parse_uuid("file_id", query.file_id.as_deref())?;
    let user_id = parse_uuid("user_id", query.user_id.as_deref())?;

    let removed = state.share_service.revoke(&auth, file_id, user_id).await?;

    Ok(Json(RevokeResponse {
        status: "200".to_string(),
        removed,
    }))
}

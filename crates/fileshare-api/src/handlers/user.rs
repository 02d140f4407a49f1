//! Public user profile handler.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use fileshare_core::error::AppError;

use crate::dto::response::{ApiResponse, ProfileResponse};
use crate::extractors::MaybeAuthUser;
use crate::state::AppState;

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: MaybeAuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProfileResponse>>, AppError> {
    let profile = state.user_service.get_profile(id).await?;
    Ok(Json(ApiResponse::ok(profile.into())))
}

//! `AuthUser` and `MaybeAuthUser` extractors: pull the bearer token from the
//! Authorization header, verify it, and build a `RequestContext`.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use fileshare_auth::Requester;
use fileshare_core::error::AppError;
use fileshare_service::context::RequestContext;

use crate::state::AppState;

/// Context of an authenticated request. Rejects anonymous requests with 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let requester = resolve_requester(parts, state)
            .await?
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;
        Ok(AuthUser(build_context(parts, Some(requester))))
    }
}

/// Context of a request that may be anonymous.
///
/// A missing header yields an anonymous context; a present but invalid
/// token is still rejected.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub RequestContext);

impl std::ops::Deref for MaybeAuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let requester = resolve_requester(parts, state).await?;
        Ok(MaybeAuthUser(build_context(parts, requester)))
    }
}

async fn resolve_requester(parts: &Parts, state: &AppState) -> Result<Option<Requester>, AppError> {
    let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

    state.authenticator.authenticate(token.trim()).await.map(Some)
}

fn build_context(parts: &Parts, requester: Option<Requester>) -> RequestContext {
    let ip_address = parts
        .headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let user_agent = parts
        .headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    RequestContext::new(requester, ip_address, user_agent)
}

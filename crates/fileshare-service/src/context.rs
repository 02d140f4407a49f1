//! Request context carrying the (optional) requester.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fileshare_auth::Requester;
use fileshare_core::error::AppError;

/// Context for the current request.
///
/// Built by the HTTP layer and passed into service methods so that
/// every operation knows *who* is acting. `requester` is `None` for
/// anonymous visitors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user, if any.
    pub requester: Option<Requester>,
    /// IP address of the request origin.
    pub ip_address: String,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(requester: Option<Requester>, ip_address: String, user_agent: Option<String>) -> Self {
        Self {
            requester,
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// Context for an anonymous request.
    pub fn anonymous() -> Self {
        Self::new(None, "unknown".to_string(), None)
    }

    /// Context for an authenticated request.
    pub fn for_requester(requester: Requester) -> Self {
        Self::new(Some(requester), "unknown".to_string(), None)
    }

    /// The requester, if authenticated.
    pub fn requester(&self) -> Option<&Requester> {
        self.requester.as_ref()
    }

    /// The requester's user id, if authenticated.
    pub fn user_id(&self) -> Option<Uuid> {
        self.requester.as_ref().map(|r| r.user_id)
    }

    /// Returns the requester or an authentication error.
    pub fn require_requester(&self) -> Result<&Requester, AppError> {
        self.requester
            .as_ref()
            .ok_or_else(|| AppError::authentication("Authentication required"))
    }
}

//! Resolves bearer tokens into requesters.

use std::sync::Arc;

use tracing::debug;

use fileshare_core::error::AppError;
use fileshare_core::result::AppResult;
use fileshare_database::store::UserStore;

use crate::acl::Requester;
use crate::jwt::JwtDecoder;

/// Verifies a token and loads the current state of its user.
#[derive(Clone)]
pub struct Authenticator {
    decoder: JwtDecoder,
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    /// Creates a new authenticator.
    pub fn new(decoder: JwtDecoder, users: Arc<dyn UserStore>) -> Self {
        Self { decoder, users }
    }

    /// Verify `token` and return the requester it identifies.
    ///
    /// Fails if the token is invalid, the user no longer exists, or the
    /// account is inactive.
    pub async fn authenticate(&self, token: &str) -> AppResult<Requester> {
        let claims = self.decoder.decode_access_token(token)?;

        let user = self
            .users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("Unknown user"))?;

        if !user.status.can_authenticate() {
            return Err(AppError::authentication("Account is inactive"));
        }

        debug!(user_id = %user.id, username = %user.username, "Authenticated request");
        Ok(Requester::from_user(&user))
    }
}

//! Typed failures of the sharing registry.

use thiserror::Error;
use uuid::Uuid;

use fileshare_core::error::AppError;

/// Why a grant could not be made.
///
/// The HTTP layer collapses the lookup variants into one generic message;
/// [`ShareError::Other`] carries authentication, authorization and store
/// failures through unchanged.
#[derive(Debug, Error)]
pub enum ShareError {
    /// No user has the requested username.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// The file id does not resolve.
    #[error("file not found: {0}")]
    FileNotFound(Uuid),

    /// The file id is missing or not a UUID.
    #[error("invalid file id: {0:?}")]
    InvalidFileId(String),

    /// Any other failure.
    #[error(transparent)]
    Other(#[from] AppError),
}

impl ShareError {
    /// Whether the failure is one of the lookup variants.
    pub fn is_lookup_failure(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<ShareError> for AppError {
    fn from(err: ShareError) -> Self {
        match err {
            ShareError::UserNotFound(_) => AppError::not_found("User does not exist"),
            ShareError::FileNotFound(_) => AppError::not_found("File not found"),
            ShareError::InvalidFileId(_) => AppError::field("file_id", "Enter a valid UUID."),
            ShareError::Other(e) => e,
        }
    }
}

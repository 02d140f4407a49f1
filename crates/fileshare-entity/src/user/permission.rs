//! Elevated file permissions a user can hold.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Permissions that let a user act on files they did not upload.
///
/// Stored as text in `users.permissions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserPermission {
    /// Edit any file's name, blob and access.
    ChangeFile,
    /// Delete any file.
    DeleteFile,
}

impl UserPermission {
    /// Return the permission as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChangeFile => "change_file",
            Self::DeleteFile => "delete_file",
        }
    }
}

impl fmt::Display for UserPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserPermission {
    type Err = fileshare_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "change_file" => Ok(Self::ChangeFile),
            "delete_file" => Ok(Self::DeleteFile),
            _ => Err(fileshare_core::AppError::validation(format!(
                "Invalid permission: '{s}'. Expected one of: change_file, delete_file"
            ))),
        }
    }
}

//! File visibility enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who may see a file.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "file_access", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FileAccess {
    /// Listed publicly and viewable by anyone, including anonymous visitors.
    #[default]
    Public,
    /// Viewable only by the author and users in the file's private set.
    Private,
}

impl FileAccess {
    /// Whether this is [`FileAccess::Private`].
    pub fn is_private(&self) -> bool {
        matches!(self, Self::Private)
    }

    /// Return the access level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for FileAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileAccess {
    type Err = fileshare_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            _ => Err(fileshare_core::AppError::field(
                "access",
                format!("Select a valid choice. '{s}' is not one of the available choices."),
            )),
        }
    }
}

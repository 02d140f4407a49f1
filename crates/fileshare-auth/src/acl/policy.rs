//! Pure access predicates over a file and an optional requester.

use uuid::Uuid;

use fileshare_entity::file::File;
use fileshare_entity::user::UserPermission;

use super::requester::Requester;

/// Mutations gated by [`can_modify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileAction {
    /// Edit name, blob or access, or manage the private set.
    Change,
    /// Delete the file.
    Delete,
}

impl FileAction {
    /// Permission that lets a non-author perform this action.
    pub fn required_permission(&self) -> UserPermission {
        match self {
            Self::Change => UserPermission::ChangeFile,
            Self::Delete => UserPermission::DeleteFile,
        }
    }
}

/// Whether `viewer` may see `file`.
///
/// Public files are visible to everyone. Private files are visible to the
/// author and to users in `members`, the file's private set.
pub fn can_view(file: &File, members: &[Uuid], viewer: Option<&Requester>) -> bool {
    if !file.access.is_private() {
        return true;
    }
    match viewer {
        Some(viewer) => file.is_authored_by(viewer.user_id) || members.contains(&viewer.user_id),
        None => false,
    }
}

/// Whether `requester` may perform `action` on `file`.
///
/// Requires an authenticated requester who is the author or holds the
/// action's elevated permission. Authorless files are only modifiable
/// through the permission.
pub fn can_modify(file: &File, requester: Option<&Requester>, action: FileAction) -> bool {
    let Some(requester) = requester else {
        return false;
    };
    file.is_authored_by(requester.user_id) || requester.has_permission(action.required_permission())
}

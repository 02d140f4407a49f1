//! Store-backed enforcement of the file access policy.

use std::sync::Arc;

use fileshare_core::error::AppError;
use fileshare_core::result::AppResult;
use fileshare_database::store::GrantStore;
use fileshare_entity::file::File;

use super::policy::{FileAction, can_modify, can_view};
use super::requester::Requester;

/// Evaluates [`can_view`] and [`can_modify`] and turns denials into errors.
///
/// Anonymous requesters are denied with an authentication error, known
/// requesters with an authorization error.
#[derive(Clone)]
pub struct AccessChecker {
    grants: Arc<dyn GrantStore>,
}

impl std::fmt::Debug for AccessChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessChecker").finish_non_exhaustive()
    }
}

impl AccessChecker {
    /// Creates a new checker reading private sets from `grants`.
    pub fn new(grants: Arc<dyn GrantStore>) -> Self {
        Self { grants }
    }

    /// Whether `viewer` may see `file`. Loads the private set only when
    /// the answer depends on it.
    pub async fn can_view(&self, file: &File, viewer: Option<&Requester>) -> AppResult<bool> {
        if can_view(file, &[], viewer) {
            return Ok(true);
        }
        if viewer.is_none() {
            return Ok(false);
        }
        let members = self.grants.member_ids(file.id).await?;
        Ok(can_view(file, &members, viewer))
    }

    /// Fail unless `viewer` may see `file`.
    pub async fn require_view(&self, file: &File, viewer: Option<&Requester>) -> AppResult<()> {
        if self.can_view(file, viewer).await? {
            return Ok(());
        }
        Err(deny(viewer, "You do not have permission to view this file"))
    }

    /// Fail unless `requester` may perform `action` on `file`.
    pub fn require_modify(
        &self,
        file: &File,
        requester: Option<&Requester>,
        action: FileAction,
    ) -> AppResult<()> {
        if can_modify(file, requester, action) {
            return Ok(());
        }
        let message = match action {
            FileAction::Change => "You do not have permission to change this file",
            FileAction::Delete => "You do not have permission to delete this file",
        };
        Err(deny(requester, message))
    }
}

fn deny(requester: Option<&Requester>, message: &str) -> AppError {
    match requester {
        Some(_) => AppError::authorization(message),
        None => AppError::authentication("Authentication required"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fileshare_core::error::ErrorKind;
    use fileshare_database::MemoryStore;
    use fileshare_database::store::UserStore;
    use fileshare_entity::file::FileAccess;
    use fileshare_entity::user::CreateUser;
    use uuid::Uuid;

    async fn private_file(store: &MemoryStore, author_id: Option<Uuid>) -> File {
        let file = File {
            id: Uuid::new_v4(),
            name: "plans".to_string(),
            author_id,
            access: FileAccess::Private,
            storage_path: "files/p/plans".to_string(),
            original_filename: "plans".to_string(),
            mime_type: None,
            size_bytes: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.insert_file(file.clone()).await;
        file
    }

    #[tokio::test]
    async fn test_member_can_view_after_grant() {
        let store = MemoryStore::new();
        let user = store.create(&CreateUser::member("bob")).await.unwrap();
        let bob = Requester::from_user(&user);
        let file = private_file(&store, None).await;
        let checker = AccessChecker::new(store.stores().grants);

        assert!(!checker.can_view(&file, Some(&bob)).await.unwrap());
        store.stores().grants.add(file.id, bob.user_id, None).await.unwrap();
        assert!(checker.can_view(&file, Some(&bob)).await.unwrap());
    }

    #[tokio::test]
    async fn test_denials_distinguish_anonymous() {
        let store = MemoryStore::new();
        let user = store.create(&CreateUser::member("eve")).await.unwrap();
        let eve = Requester::from_user(&user);
        let file = private_file(&store, None).await;
        let checker = AccessChecker::new(store.stores().grants);

        let err = checker.require_view(&file, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        let err = checker.require_view(&file, Some(&eve)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let err = checker
            .require_modify(&file, Some(&eve), FileAction::Delete)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}

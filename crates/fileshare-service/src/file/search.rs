//! Public file listing with name filtering.

use std::sync::Arc;

use serde::Serialize;

use fileshare_core::error::AppError;
use fileshare_core::result::AppResult;
use fileshare_core::types::pagination::{PageRequest, PageResponse};
use fileshare_database::store::FileStore;
use fileshare_entity::file::File;

/// One page of the public listing, with the query that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct PublicListing {
    /// The effective search term, `None` when unfiltered.
    pub search: Option<String>,
    /// The page of public files, newest first.
    pub files: PageResponse<File>,
}

/// Lists and filters public files.
#[derive(Clone)]
pub struct SearchService {
    files: Arc<dyn FileStore>,
    page_size: u64,
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl SearchService {
    /// Creates a new search service.
    pub fn new(files: Arc<dyn FileStore>, page_size: u64) -> Self {
        Self { files, page_size }
    }

    /// Public files whose name contains `query`, case-insensitively.
    ///
    /// A blank query is treated as no query. Pages past the last one
    /// fail with not-found; page 1 is always valid.
    pub async fn filter_listing(&self, query: Option<&str>, page: u64) -> AppResult<PublicListing> {
        let request = PageRequest::new(page, self.page_size);
        if page == 0 || !request.is_addressable() {
            return Err(AppError::not_found("Invalid page"));
        }
        let search = normalize_query(query);

        let files = self
            .files
            .find_public_by_name(search.as_deref(), &request)
            .await?;
        if files.is_out_of_range() {
            return Err(AppError::not_found("Invalid page"));
        }

        Ok(PublicListing { search, files })
    }
}

fn normalize_query(query: Option<&str>) -> Option<String> {
    query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use fileshare_core::error::ErrorKind;
    use fileshare_database::MemoryStore;
    use fileshare_entity::file::FileAccess;
    use uuid::Uuid;

    async fn seed(store: &MemoryStore, name: &str, access: FileAccess, age_minutes: i64) -> File {
        let created = Utc::now() - Duration::minutes(age_minutes);
        let file = File {
            id: Uuid::new_v4(),
            name: name.to_string(),
            author_id: None,
            access,
            storage_path: format!("files/{name}"),
            original_filename: name.to_string(),
            mime_type: None,
            size_bytes: 1,
            created_at: created,
            updated_at: created,
        };
        store.insert_file(file.clone()).await;
        file
    }

    fn service(store: &MemoryStore) -> SearchService {
        SearchService::new(store.stores().files, 10)
    }

    #[tokio::test]
    async fn test_listing_pages_public_files_newest_first() {
        let store = MemoryStore::new();
        for i in 0..15 {
            seed(&store, &format!("public-{i}"), FileAccess::Public, i).await;
        }
        for i in 0..5 {
            seed(&store, &format!("private-{i}"), FileAccess::Private, i).await;
        }
        let svc = service(&store);

        let first = svc.filter_listing(None, 1).await.unwrap();
        assert_eq!(first.files.items.len(), 10);
        assert_eq!(first.files.total_items, 15);
        assert_eq!(first.files.items[0].name, "public-0");
        assert!(first
            .files
            .items
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at));

        let second = svc.filter_listing(None, 2).await.unwrap();
        assert_eq!(second.files.items.len(), 5);
        assert!(second.files.items.iter().all(File::is_listed));

        let err = svc.filter_listing(None, 3).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_query_is_case_insensitive_and_skips_private() {
        let store = MemoryStore::new();
        seed(&store, "Quarterly Report", FileAccess::Public, 1).await;
        seed(&store, "report draft", FileAccess::Private, 2).await;
        seed(&store, "holiday photos", FileAccess::Public, 3).await;
        let svc = service(&store);

        let listing = svc.filter_listing(Some("REPORT"), 1).await.unwrap();
        assert_eq!(listing.search.as_deref(), Some("REPORT"));
        let names: Vec<_> = listing.files.items.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Quarterly Report"]);
    }

    #[tokio::test]
    async fn test_blank_query_equals_no_query() {
        let store = MemoryStore::new();
        seed(&store, "a", FileAccess::Public, 1).await;
        seed(&store, "b", FileAccess::Public, 2).await;
        let svc = service(&store);

        let blank = svc.filter_listing(Some("   "), 1).await.unwrap();
        let none = svc.filter_listing(None, 1).await.unwrap();
        assert!(blank.search.is_none());
        assert_eq!(blank.files.total_items, none.files.total_items);
    }

    #[tokio::test]
    async fn test_empty_listing_first_page_is_valid() {
        let store = MemoryStore::new();
        let svc = service(&store);

        let listing = svc.filter_listing(Some("nothing"), 1).await.unwrap();
        assert!(listing.files.items.is_empty());
        assert!(svc.filter_listing(None, 0).await.is_err());
    }

    #[tokio::test]
    async fn test_huge_page_is_not_found() {
        let store = MemoryStore::new();
        seed(&store, "a", FileAccess::Public, 1).await;
        let svc = service(&store);

        for page in [u64::MAX, i64::MAX as u64, 2] {
            let err = svc.filter_listing(None, page).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::NotFound);
            assert_eq!(err.message, "Invalid page");
        }
    }
}

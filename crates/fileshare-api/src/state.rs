//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use fileshare_auth::{Authenticator, JwtDecoder};
use fileshare_core::config::AppConfig;
use fileshare_core::traits::storage::StorageProvider;
use fileshare_database::Stores;
use fileshare_service::{FileService, SearchService, ShareService, UploadService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Entity stores
    pub stores: Stores,
    /// Blob storage provider
    pub storage: Arc<dyn StorageProvider>,

    // ── Auth ─────────────────────────────────────────────────
    /// Resolves bearer tokens into requesters
    pub authenticator: Arc<Authenticator>,

    // ── Services ─────────────────────────────────────────────
    /// Public listing
    pub search_service: Arc<SearchService>,
    /// New uploads
    pub upload_service: Arc<UploadService>,
    /// Detail, download, edit and delete
    pub file_service: Arc<FileService>,
    /// Grant and revoke
    pub share_service: Arc<ShareService>,
    /// User profiles
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Wire every service from the stores and the storage provider.
    pub fn new(config: AppConfig, stores: Stores, storage: Arc<dyn StorageProvider>) -> Self {
        let authenticator = Arc::new(Authenticator::new(
            JwtDecoder::new(&config.auth),
            Arc::clone(&stores.users),
        ));
        let search_service = Arc::new(SearchService::new(
            Arc::clone(&stores.files),
            config.listing.page_size,
        ));
        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&stores.files),
            Arc::clone(&storage),
            config.storage.clone(),
        ));
        let file_service = Arc::new(FileService::new(
            Arc::clone(&stores.files),
            Arc::clone(&stores.users),
            Arc::clone(&stores.grants),
            Arc::clone(&storage),
            config.storage.clone(),
        ));
        let share_service = Arc::new(ShareService::new(
            Arc::clone(&stores.files),
            Arc::clone(&stores.users),
            Arc::clone(&stores.grants),
        ));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&stores.users),
            Arc::clone(&stores.files),
            config.listing.page_size,
        ));

        Self {
            config: Arc::new(config),
            stores,
            storage,
            authenticator,
            search_service,
            upload_service,
            file_service,
            share_service,
            user_service,
        }
    }
}

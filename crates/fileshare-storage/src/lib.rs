//! # fileshare-storage
//!
//! Blob storage for uploaded files. Only the local filesystem provider
//! ships; other backends plug in through
//! [`fileshare_core::traits::StorageProvider`].

pub mod paths;
pub mod providers;

pub use paths::{blob_path, mime_from_filename, sanitize_filename};
pub use providers::LocalStorageProvider;

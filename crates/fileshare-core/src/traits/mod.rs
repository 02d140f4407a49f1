//! Core traits defined in `fileshare-core` and implemented by other crates.

pub mod storage;

pub use storage::{ByteStream, StorageProvider};

//! # fileshare-service
//!
//! Business logic service layer for FileShare. Each service orchestrates
//! the entity stores, blob storage and access policy to implement one
//! group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references. Every access-checked
//! operation takes an explicit [`RequestContext`].

pub mod context;
pub mod file;
pub mod share;
pub mod user;

pub use context::RequestContext;
pub use file::{FileService, SearchService, UploadService};
pub use share::{ShareError, ShareService};
pub use user::UserService;

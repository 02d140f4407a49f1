//! File services: public listing, upload, detail, edit and delete.

pub mod form;
pub mod search;
pub mod service;
pub mod upload;

pub use form::{EditFileForm, FileForm, UploadedBlob};
pub use search::{PublicListing, SearchService};
pub use service::{FileDetail, FileService};
pub use upload::UploadService;

//! File domain entities.

pub mod access;
pub mod model;

pub use access::FileAccess;
pub use model::{CreateFile, File, FileBlob, MAX_NAME_LENGTH, UpdateFile};

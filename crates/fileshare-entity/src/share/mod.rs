//! Private-access grants on files.

pub mod model;

pub use model::FileGrant;

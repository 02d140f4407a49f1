//! The sharing registry: private member sets of files.

pub mod error;
pub mod service;

pub use error::ShareError;
pub use service::{GrantOutcome, ShareService};

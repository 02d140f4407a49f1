//! File access policy.

pub mod checker;
pub mod policy;
pub mod requester;

pub use checker::AccessChecker;
pub use policy::{FileAction, can_modify, can_view};
pub use requester::Requester;

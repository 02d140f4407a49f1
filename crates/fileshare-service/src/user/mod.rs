//! Read-only user profiles.

pub mod service;

pub use service::{UserProfile, UserService};

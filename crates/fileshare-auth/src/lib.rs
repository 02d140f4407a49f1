//! # fileshare-auth
//!
//! Identity and authorization for FileShare.
//!
//! ## Modules
//!
//! - `jwt`: bearer token claims, signing and verification
//! - `authenticator`: resolves a verified token into a [`Requester`]
//! - `acl`: the file access policy (`can_view`, `can_modify`) and the
//!   store-backed [`AccessChecker`] that enforces it

pub mod acl;
pub mod authenticator;
pub mod jwt;

pub use acl::{AccessChecker, FileAction, Requester, can_modify, can_view};
pub use authenticator::Authenticator;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};

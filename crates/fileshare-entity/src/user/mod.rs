//! User domain entities.

pub mod model;
pub mod permission;
pub mod role;
pub mod status;

pub use model::{CreateUser, User};
pub use permission::UserPermission;
pub use role::UserRole;
pub use status::UserStatus;

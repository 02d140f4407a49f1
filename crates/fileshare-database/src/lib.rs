//! # fileshare-database
//!
//! The entity store: store traits consumed by the services, PostgreSQL
//! repositories implementing them, and an in-memory store for development
//! and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{FileStore, GrantStore, Stores, UserStore};

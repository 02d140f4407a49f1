//! Data transfer objects for requests and responses.

pub mod request;
pub mod response;

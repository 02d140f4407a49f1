//! End-to-end tests driving the HTTP router against the in-memory store.

mod helpers;

mod file_test;
mod permission_test;
mod share_test;

//! Remote directory adapters.
//!
//! This module provides the HTTP implementation of the `DirectorySource`
//! port.

mod http_source;

pub use http_source::{DEFAULT_POSTS_URL, DEFAULT_USERS_URL, DirectoryEndpoints, HttpDirectorySource};

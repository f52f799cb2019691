//! Mapping helpers from port failures to domain errors.

use crate::domain::Error;
use crate::domain::ports::{CacheStoreError, DirectorySourceError};

pub(super) fn map_users_error(error: DirectorySourceError) -> Error {
    Error::source_unavailable(format!("users could not be fetched: {error}"))
}

pub(super) fn map_cache_error(error: CacheStoreError) -> Error {
    match error {
        CacheStoreError::Backend { message } => {
            Error::cache_unavailable(format!("user cache unavailable: {message}"))
        }
        CacheStoreError::Serialization { message } => {
            Error::cache_unavailable(format!("user cache could not be encoded: {message}"))
        }
    }
}

//! Port interface for the single cache slot holding the user collection.
//!
//! The slot is synchronous: reads and writes never suspend the loader. A
//! stored snapshot is authoritative until it is overwritten or cleared.

use super::define_port_error;
use crate::domain::User;

define_port_error! {
    /// Errors surfaced by the caching adapter.
    pub enum CacheStoreError {
        /// Storage backend failed to read, write, or remove the slot.
        Backend { message: String } => "user cache backend failure: {message}",
        /// Slot contents could not be serialised or parsed.
        Serialization { message: String } => "user cache serialisation failed: {message}",
    }
}

/// Durable single-slot store for the user collection.
#[cfg_attr(test, mockall::automock)]
pub trait CacheStore: Send + Sync {
    /// Read the cached collection, or `None` when the slot is empty.
    fn read(&self) -> Result<Option<Vec<User>>, CacheStoreError>;

    /// Overwrite the slot with `users`.
    fn write(&self, users: &[User]) -> Result<(), CacheStoreError>;

    /// Remove the slot so the next read returns `None`.
    fn clear(&self) -> Result<(), CacheStoreError>;
}

//! File-backed cache slot on top of `slot-store`.

use camino::Utf8Path;
use slot_store::{SlotError, SlotName, SlotStore};
use tracing::debug;

use super::codec;
use crate::domain::User;
use crate::domain::ports::{CacheStore, CacheStoreError};

/// Slot name used when none is configured.
pub const DEFAULT_CACHE_SLOT: &str = "userList";

/// Cache slot persisted as one file under a cache directory.
///
/// Writes go through a staged file and a rename, so a crash mid-write leaves
/// the previous snapshot intact.
#[derive(Debug)]
pub struct SlotCacheStore {
    store: SlotStore,
    slot: SlotName,
}

impl SlotCacheStore {
    /// Open (creating if needed) `root` and bind the named slot.
    ///
    /// # Errors
    ///
    /// Returns [`CacheStoreError::Backend`] when the slot name is invalid or
    /// the directory cannot be opened.
    pub fn open(root: &Utf8Path, slot: &str) -> Result<Self, CacheStoreError> {
        let slot = SlotName::new(slot).map_err(map_slot_error)?;
        let store = SlotStore::open(root).map_err(map_slot_error)?;
        debug!(root = %store.root(), slot = %slot, "opened user cache slot");
        Ok(Self { store, slot })
    }

    /// Directory holding the slot file.
    pub fn root(&self) -> &Utf8Path {
        self.store.root()
    }
}

impl CacheStore for SlotCacheStore {
    fn read(&self) -> Result<Option<Vec<User>>, CacheStoreError> {
        let raw = self.store.read(&self.slot).map_err(map_slot_error)?;
        raw.as_deref().map(codec::decode).transpose()
    }

    fn write(&self, users: &[User]) -> Result<(), CacheStoreError> {
        let encoded = codec::encode(users)?;
        self.store
            .write(&self.slot, &encoded)
            .map_err(map_slot_error)
    }

    fn clear(&self) -> Result<(), CacheStoreError> {
        let removed = self.store.clear(&self.slot).map_err(map_slot_error)?;
        debug!(slot = %self.slot, removed, "cleared user cache slot");
        Ok(())
    }
}

fn map_slot_error(error: SlotError) -> CacheStoreError {
    match error {
        SlotError::InvalidContents { .. } => CacheStoreError::serialization(error.to_string()),
        _ => CacheStoreError::backend(error.to_string()),
    }
}

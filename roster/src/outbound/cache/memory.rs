//! Process-local cache slot.

use std::sync::{Mutex, MutexGuard};

use super::codec;
use crate::domain::User;
use crate::domain::ports::{CacheStore, CacheStoreError};

/// Cache slot held in memory as JSON text.
///
/// Contents vanish with the process. [`InMemoryCacheStore::with_raw`] seeds
/// arbitrary text, which is how tests simulate a corrupt slot.
#[derive(Debug, Default)]
pub struct InMemoryCacheStore {
    slot: Mutex<Option<String>>,
}

impl InMemoryCacheStore {
    /// An empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot pre-filled with `raw`, which need not be valid JSON.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    /// Current slot text, if any.
    pub fn raw(&self) -> Option<String> {
        self.lock().ok().and_then(|slot| slot.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<String>>, CacheStoreError> {
        self.slot
            .lock()
            .map_err(|_| CacheStoreError::backend("in-memory cache mutex poisoned"))
    }
}

impl CacheStore for InMemoryCacheStore {
    fn read(&self) -> Result<Option<Vec<User>>, CacheStoreError> {
        self.lock()?.as_deref().map(codec::decode).transpose()
    }

    fn write(&self, users: &[User]) -> Result<(), CacheStoreError> {
        let encoded = codec::encode(users)?;
        *self.lock()? = Some(encoded);
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheStoreError> {
        *self.lock()? = None;
        Ok(())
    }
}

//! User cache slot adapters.
//!
//! Both adapters store the collection as JSON text, so a snapshot written by
//! one can be read by the other:
//!
//! - [`SlotCacheStore`] keeps the text in a named file under a cache
//!   directory, replacing it atomically on write.
//! - [`InMemoryCacheStore`] keeps the text in process memory and lets tests
//!   inject raw contents.

mod codec;
mod memory;
mod slot_cache;

pub use memory::InMemoryCacheStore;
pub use slot_cache::{DEFAULT_CACHE_SLOT, SlotCacheStore};

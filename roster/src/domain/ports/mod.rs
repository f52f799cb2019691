//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_store;
mod directory_source;

#[cfg(test)]
pub use cache_store::MockCacheStore;
pub use cache_store::{CacheStore, CacheStoreError};
#[cfg(test)]
pub use directory_source::MockDirectorySource;
pub use directory_source::{DirectorySource, DirectorySourceError, FixtureDirectorySource};

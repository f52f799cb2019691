//! Cache-or-fetch orchestration for the user collection.
//!
//! The loader owns the policy for when the directory is consulted: a cached
//! snapshot always wins, and a fetched collection is always written back
//! before it is returned. Both collaborators arrive through domain ports.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{CacheStore, CacheStoreError, DirectorySource};
use crate::domain::{Error, User, join};

mod mapping;

/// Where a loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Read from the cache slot; the directory was not contacted.
    Cache,
    /// Fetched from the directory with posts joined.
    Remote,
    /// Fetched from the directory, but posts were unavailable.
    RemoteWithoutPosts,
}

/// A loaded collection and its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRoster {
    /// Users in directory (or cached) order.
    pub users: Vec<User>,
    /// How the users were obtained.
    pub origin: LoadOrigin,
}

impl LoadedRoster {
    /// Whether posts could not be attached during this load.
    pub fn is_degraded(&self) -> bool {
        self.origin == LoadOrigin::RemoteWithoutPosts
    }
}

/// Loads users from the cache slot, falling back to the directory.
#[derive(Clone)]
pub struct Loader {
    source: Arc<dyn DirectorySource>,
    cache: Arc<dyn CacheStore>,
}

impl Loader {
    /// Build a loader over the given ports.
    /// ```rust,ignore
    /// let loader = Loader::new(Arc::new(source), Arc::new(cache));
    /// ```
    pub fn new(source: Arc<dyn DirectorySource>, cache: Arc<dyn CacheStore>) -> Self {
        Self { source, cache }
    }

    /// Return the cached collection, or fetch, join, and cache it.
    ///
    /// A cache hit issues no directory request. Unreadable cache contents are
    /// discarded and treated as a miss.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::SourceUnavailable`](crate::domain::ErrorCode) when users
    /// cannot be fetched, and
    /// [`ErrorCode::CacheUnavailable`](crate::domain::ErrorCode) when the
    /// slot cannot be read or cleared.
    ///
    /// ```rust,ignore
    /// let roster = loader.load().await?;
    /// println!("{} users", roster.users.len());
    /// ```
    pub async fn load(&self) -> Result<LoadedRoster, Error> {
        match self.cache.read() {
            Ok(Some(users)) => {
                debug!(users = users.len(), "user cache hit");
                return Ok(LoadedRoster {
                    users,
                    origin: LoadOrigin::Cache,
                });
            }
            Ok(None) => debug!("user cache miss"),
            Err(CacheStoreError::Serialization { message }) => {
                warn!(%message, "discarding unreadable user cache");
                self.cache.clear().map_err(mapping::map_cache_error)?;
            }
            Err(error) => return Err(mapping::map_cache_error(error)),
        }

        self.fetch_and_store().await
    }

    /// Drop the cached snapshot and fetch afresh.
    ///
    /// # Errors
    ///
    /// As for [`Loader::load`].
    pub async fn clear_cache_and_reload(&self) -> Result<LoadedRoster, Error> {
        self.cache.clear().map_err(mapping::map_cache_error)?;
        debug!("user cache cleared");
        self.fetch_and_store().await
    }

    /// Overwrite the cache slot with `users`.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::CacheUnavailable`](crate::domain::ErrorCode) when the
    /// slot cannot be written.
    pub fn persist(&self, users: &[User]) -> Result<(), Error> {
        self.cache.write(users).map_err(mapping::map_cache_error)?;
        debug!(users = users.len(), "user cache written");
        Ok(())
    }

    async fn fetch_and_store(&self) -> Result<LoadedRoster, Error> {
        let users = self
            .source
            .fetch_users()
            .await
            .map_err(mapping::map_users_error)?;
        debug!(users = users.len(), "fetched users");

        let roster = match self.source.fetch_posts().await {
            Ok(posts) => {
                debug!(posts = posts.len(), "fetched posts");
                LoadedRoster {
                    users: join(users, &posts),
                    origin: LoadOrigin::Remote,
                }
            }
            Err(error) => {
                warn!(%error, "posts unavailable; caching users without posts");
                LoadedRoster {
                    users,
                    origin: LoadOrigin::RemoteWithoutPosts,
                }
            }
        };

        if let Err(error) = self.cache.write(&roster.users) {
            // The fetched collection is still returned; the next load refetches.
            warn!(%error, "failed to cache fetched users");
        }
        Ok(roster)
    }
}

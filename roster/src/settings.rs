//! Runtime configuration loaded via OrthoConfig.
//!
//! Every field is optional; the accessors supply defaults and validate the
//! raw strings into the types the adapters need.

use std::path::PathBuf;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{KeyStrategy, KeyStrategyParseError};
use crate::outbound::cache::DEFAULT_CACHE_SLOT;
use crate::outbound::directory::{DEFAULT_POSTS_URL, DEFAULT_USERS_URL, DirectoryEndpoints};

const DEFAULT_CACHE_DIR: &str = ".roster";

/// Errors raised while resolving configured values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// An endpoint could not be parsed as a URL.
    #[error("invalid directory endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    /// The key strategy name is unknown.
    #[error(transparent)]
    InvalidKeyStrategy(#[from] KeyStrategyParseError),
    /// The cache directory is not valid UTF-8.
    #[error("cache directory is not valid UTF-8: {path}")]
    NonUtf8CacheDir {
        /// Offending path, lossily rendered.
        path: String,
    },
}

/// Configuration for the directory endpoints, cache slot, and key strategy.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROSTER")]
pub struct RosterSettings {
    /// Users endpoint.
    #[ortho_config(default = String::from(DEFAULT_USERS_URL))]
    pub users_url: Option<String>,
    /// Posts endpoint.
    #[ortho_config(default = String::from(DEFAULT_POSTS_URL))]
    pub posts_url: Option<String>,
    /// Directory holding the cache slot file.
    #[ortho_config(default = PathBuf::from(DEFAULT_CACHE_DIR))]
    pub cache_dir: Option<PathBuf>,
    /// Cache slot name.
    #[ortho_config(default = String::from(DEFAULT_CACHE_SLOT))]
    pub cache_slot: Option<String>,
    /// Key strategy for local additions: `uuid` or `name-timestamp`.
    #[ortho_config(default = KeyStrategy::default().to_string())]
    pub key_strategy: Option<String>,
}

impl RosterSettings {
    /// Parsed directory endpoints, falling back to the public defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidEndpoint`] for a malformed override.
    pub fn endpoints(&self) -> Result<DirectoryEndpoints, SettingsError> {
        let users = self.users_url.as_deref().unwrap_or(DEFAULT_USERS_URL);
        let posts = self.posts_url.as_deref().unwrap_or(DEFAULT_POSTS_URL);
        Ok(DirectoryEndpoints::parse(users, posts)?)
    }

    /// Cache directory, defaulting to `.roster` under the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NonUtf8CacheDir`] when the path is not UTF-8.
    pub fn cache_dir(&self) -> Result<Utf8PathBuf, SettingsError> {
        match &self.cache_dir {
            None => Ok(Utf8PathBuf::from(DEFAULT_CACHE_DIR)),
            Some(path) => Utf8PathBuf::from_path_buf(path.clone()).map_err(|path| {
                SettingsError::NonUtf8CacheDir {
                    path: path.to_string_lossy().into_owned(),
                }
            }),
        }
    }

    /// Cache slot name, defaulting to `userList`.
    pub fn cache_slot(&self) -> &str {
        self.cache_slot.as_deref().unwrap_or(DEFAULT_CACHE_SLOT)
    }

    /// Key strategy, defaulting to UUID keys.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidKeyStrategy`] for an unknown name.
    pub fn key_strategy(&self) -> Result<KeyStrategy, SettingsError> {
        self.key_strategy
            .as_deref()
            .map_or(Ok(KeyStrategy::default()), str::parse::<KeyStrategy>)
            .map_err(SettingsError::from)
    }
}

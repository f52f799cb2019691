//! Key synthesis for users added locally.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use mockable::Clock;
use uuid::Uuid;

use super::UserKey;

/// Produces keys for users that arrive without one.
pub trait UserKeyGenerator: Send + Sync {
    /// Generate a key for a user with the given display name.
    fn generate(&self, name: Option<&str>) -> UserKey;
}

/// Random UUID keys; unique across sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidKeyGenerator;

impl UserKeyGenerator for UuidKeyGenerator {
    fn generate(&self, _name: Option<&str>) -> UserKey {
        UserKey::Text(Uuid::new_v4().to_string())
    }
}

/// Name followed by the current Unix time in milliseconds.
///
/// Two additions with the same name inside one millisecond collide. Kept for
/// caches written by earlier clients that used this scheme.
pub struct NameTimestampKeyGenerator {
    clock: Arc<dyn Clock>,
}

impl NameTimestampKeyGenerator {
    /// Build a generator reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl UserKeyGenerator for NameTimestampKeyGenerator {
    fn generate(&self, name: Option<&str>) -> UserKey {
        let millis = self.clock.utc().timestamp_millis();
        UserKey::Text(format!("{}{millis}", name.unwrap_or_default()))
    }
}

/// Selects how local additions are keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyStrategy {
    /// [`UuidKeyGenerator`].
    #[default]
    Uuid,
    /// [`NameTimestampKeyGenerator`].
    NameTimestamp,
}

impl KeyStrategy {
    /// Build the generator for this strategy.
    pub fn generator(self, clock: Arc<dyn Clock>) -> Box<dyn UserKeyGenerator> {
        match self {
            Self::Uuid => Box::new(UuidKeyGenerator),
            Self::NameTimestamp => Box::new(NameTimestampKeyGenerator::new(clock)),
        }
    }
}

/// Raised when a key strategy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key strategy '{value}' (expected 'uuid' or 'name-timestamp')")]
pub struct KeyStrategyParseError {
    value: String,
}

impl FromStr for KeyStrategy {
    type Err = KeyStrategyParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "uuid" => Ok(Self::Uuid),
            "name-timestamp" | "name_timestamp" => Ok(Self::NameTimestamp),
            _ => Err(KeyStrategyParseError {
                value: value.to_owned(),
            }),
        }
    }
}

impl fmt::Display for KeyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uuid => f.write_str("uuid"),
            Self::NameTimestamp => f.write_str("name-timestamp"),
        }
    }
}

//! Domain records, ports, and orchestration.
//!
//! Purpose: own the user/post model, the join that attaches posts to users,
//! the cache-or-fetch loader, and the in-memory user list consumers mutate.
//! Adapters live in `inbound` and `outbound`; nothing here knows about HTTP,
//! files, or terminals.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Post, UserKey: directory records (serde contract is the cache
//!   layout).
//! - join: attaches posts to their owning users.
//! - Loader, LoadedRoster, LoadOrigin: cache-or-fetch orchestration.
//! - UserList, NewUser: mutable collection with add/delete listeners.
//! - KeyStrategy, UserKeyGenerator: synthesised keys for local additions.

pub mod error;
mod join;
mod key_generator;
mod loader;
pub mod ports;
mod user;
mod user_list;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::join::join;
pub use self::key_generator::{
    KeyStrategy, KeyStrategyParseError, NameTimestampKeyGenerator, UserKeyGenerator,
    UuidKeyGenerator,
};
pub use self::loader::{LoadOrigin, LoadedRoster, Loader};
pub use self::user::{Post, User, UserKey};
pub use self::user_list::{NewUser, UserList};

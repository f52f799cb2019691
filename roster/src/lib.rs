//! Roster library modules.
//!
//! A cache-first loader for a remote user and post directory. `domain` owns
//! the records, join, loader, and user list; `outbound` adapts the HTTP
//! directory and the cache slot; `inbound` exposes the terminal commands.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;

pub use settings::{RosterSettings, SettingsError};

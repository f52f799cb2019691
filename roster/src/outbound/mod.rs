//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **directory**: reqwest-backed reader for the remote user and post
//!   endpoints
//! - **cache**: the user cache slot, file-backed via `slot-store` or held in
//!   memory
//!
//! Adapters translate between wire or storage formats and domain types. They
//! contain no loading policy.

pub mod cache;
pub mod directory;

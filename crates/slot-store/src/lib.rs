//! Durable named text slots backed by files.
//!
//! A slot is a single well-known location holding one textual snapshot. The
//! crate knows nothing about what the text means; callers serialise their own
//! data before writing and parse it after reading.
//!
//! # Overview
//!
//! - [`SlotName`] validates names so each slot maps onto one file
//! - [`SlotStore`] reads, atomically replaces, and clears slots
//! - [`SlotError`] reports failures with the affected path
//!
//! # Example
//!
//! ```
//! use slot_store::{SlotName, SlotStore};
//!
//! let temp = tempfile::tempdir().expect("temp dir");
//! let root = camino::Utf8Path::from_path(temp.path()).expect("utf-8 path");
//! let store = SlotStore::open(root).expect("open store");
//! let slot = SlotName::new("userList").expect("valid slot");
//!
//! store.write(&slot, r#"[{"id":1}]"#).expect("write snapshot");
//! assert_eq!(store.read(&slot).expect("read").as_deref(), Some(r#"[{"id":1}]"#));
//! ```

mod atomic_io;
mod error;
mod slot;

pub use error::SlotError;
pub use slot::{SlotName, SlotStore};

//! Named slots and the directory-backed store that holds them.

use std::fmt;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;

use crate::atomic_io::replace_atomically;
use crate::error::SlotError;

const SLOT_EXTENSION: &str = "slot";

/// Validated slot name.
///
/// A slot maps onto exactly one file directly inside the store directory, so
/// names are limited to ASCII letters, digits, `-`, `_`, and `.`, and must not
/// start with a dot (hidden names are reserved for staging files).
///
/// # Example
///
/// ```
/// use slot_store::SlotName;
///
/// let slot = SlotName::new("userList").expect("valid name");
/// assert_eq!(slot.file_name(), "userList.slot");
/// assert!(SlotName::new("../escape").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotName(String);

impl SlotName {
    /// Validates `name` as a slot name.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidName`] when the name is empty, hidden, or
    /// contains characters outside the permitted set.
    pub fn new(name: impl Into<String>) -> Result<Self, SlotError> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("must not be empty")
        } else if name.starts_with('.') {
            Some("must not start with '.'")
        } else if name.contains(['/', '\\']) {
            Some("must not contain path separators")
        } else if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            Some("may only contain ASCII letters, digits, '-', '_', or '.'")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(SlotError::InvalidName { name, reason }),
            None => Ok(Self(name)),
        }
    }

    /// Returns the slot name as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the file name backing this slot.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{SLOT_EXTENSION}", self.0)
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Durable text slots stored as files under one directory.
///
/// The store holds a capability handle to its directory; slot operations can
/// never reach outside it.
///
/// # Example
///
/// ```
/// use slot_store::{SlotName, SlotStore};
///
/// let temp = tempfile::tempdir().expect("temp dir");
/// let root = camino::Utf8Path::from_path(temp.path()).expect("utf-8 path");
/// let store = SlotStore::open(root).expect("open store");
/// let slot = SlotName::new("userList").expect("valid name");
///
/// assert_eq!(store.read(&slot).expect("read"), None);
/// store.write(&slot, "[]").expect("write");
/// assert_eq!(store.read(&slot).expect("read").as_deref(), Some("[]"));
/// assert!(store.clear(&slot).expect("clear"));
/// assert_eq!(store.read(&slot).expect("read"), None);
/// ```
#[derive(Debug)]
pub struct SlotStore {
    root: Utf8PathBuf,
    dir: Dir,
}

impl SlotStore {
    /// Opens the store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::OpenError`] when the directory cannot be created
    /// or opened.
    pub fn open(root: &Utf8Path) -> Result<Self, SlotError> {
        let open_error = |err: io::Error| SlotError::OpenError {
            path: root.to_path_buf(),
            message: err.to_string(),
        };
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(open_error)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(open_error)?;
        Ok(Self {
            root: root.to_path_buf(),
            dir,
        })
    }

    /// Returns the directory this store writes into.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Reads the text held in `slot`, or `None` when the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::ReadError`] when the slot file exists but cannot
    /// be read, and [`SlotError::InvalidContents`] when it does not hold UTF-8
    /// text.
    pub fn read(&self, slot: &SlotName) -> Result<Option<String>, SlotError> {
        let file_name = slot.file_name();
        let bytes = match self.dir.read(&file_name) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(SlotError::ReadError {
                    path: Utf8PathBuf::from(file_name),
                    message: err.to_string(),
                });
            }
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|err| SlotError::InvalidContents {
                path: Utf8PathBuf::from(file_name),
                message: err.utf8_error().to_string(),
            })
    }

    /// Replaces the contents of `slot` with `contents`.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::WriteError`] when the new snapshot cannot be
    /// staged or swapped into place; the previous contents stay intact.
    pub fn write(&self, slot: &SlotName, contents: &str) -> Result<(), SlotError> {
        replace_atomically(&self.dir, &slot.file_name(), contents)
    }

    /// Removes `slot`, returning whether it held anything.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::ClearError`] when an existing slot file cannot be
    /// removed.
    pub fn clear(&self, slot: &SlotName) -> Result<bool, SlotError> {
        let file_name = slot.file_name();
        match self.dir.remove_file(&file_name) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(SlotError::ClearError {
                path: Utf8PathBuf::from(file_name),
                message: err.to_string(),
            }),
        }
    }
}

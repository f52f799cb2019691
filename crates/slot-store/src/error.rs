//! Error types for the slot-store crate.
//!
//! Every filesystem failure carries the slot path it concerned and the
//! rendered I/O message, so callers can surface them without holding on to
//! `io::Error` values (which are neither `Clone` nor `PartialEq`).

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while naming, opening, reading, writing, or clearing slots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    /// The slot name cannot be mapped onto a single file in the store.
    #[error("invalid slot name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// The store directory could not be created or opened.
    #[error("failed to open slot directory '{path}': {message}")]
    OpenError {
        /// Directory that was being opened.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The slot file exists but could not be read.
    #[error("failed to read slot '{path}': {message}")]
    ReadError {
        /// Slot file path relative to the store root.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The slot file was read but does not hold UTF-8 text.
    #[error("slot '{path}' does not hold UTF-8 text: {message}")]
    InvalidContents {
        /// Slot file path relative to the store root.
        path: Utf8PathBuf,
        /// Description of the decoding error.
        message: String,
    },

    /// The slot contents could not be written or swapped into place.
    #[error("failed to write slot '{path}': {message}")]
    WriteError {
        /// File path that failed, relative to the store root.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The slot file could not be removed.
    #[error("failed to clear slot '{path}': {message}")]
    ClearError {
        /// Slot file path relative to the store root.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::invalid_name(
        SlotError::InvalidName { name: "../x".to_owned(), reason: "must not contain path separators" },
        "invalid slot name '../x': must not contain path separators"
    )]
    #[case::open(
        SlotError::OpenError { path: Utf8PathBuf::from("/tmp/cache"), message: "denied".to_owned() },
        "failed to open slot directory '/tmp/cache': denied"
    )]
    #[case::read(
        SlotError::ReadError { path: Utf8PathBuf::from("userList.slot"), message: "permission denied".to_owned() },
        "failed to read slot 'userList.slot': permission denied"
    )]
    #[case::invalid_contents(
        SlotError::InvalidContents { path: Utf8PathBuf::from("userList.slot"), message: "invalid utf-8 sequence".to_owned() },
        "slot 'userList.slot' does not hold UTF-8 text: invalid utf-8 sequence"
    )]
    #[case::write(
        SlotError::WriteError { path: Utf8PathBuf::from("userList.slot"), message: "disk full".to_owned() },
        "failed to write slot 'userList.slot': disk full"
    )]
    #[case::clear(
        SlotError::ClearError { path: Utf8PathBuf::from("userList.slot"), message: "busy".to_owned() },
        "failed to clear slot 'userList.slot': busy"
    )]
    fn slot_errors_format_with_path_and_message(#[case] err: SlotError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }
}

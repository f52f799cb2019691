//! Atomic slot replacement.
//!
//! Contents are staged in a hidden sibling file, flushed to disk, and renamed
//! over the slot file. Readers therefore observe either the previous snapshot
//! or the new one, never a truncated mix.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::Utf8Path;
use cap_std::fs::{Dir, OpenOptions};

use crate::error::SlotError;

static STAGING_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Staged file that is removed on drop unless it was swapped into place.
struct StagedFile<'dir> {
    dir: &'dir Dir,
    name: String,
    committed: bool,
}

impl<'dir> StagedFile<'dir> {
    fn create(dir: &'dir Dir, target: &str, contents: &str) -> Result<Self, SlotError> {
        let name = staging_name(target);
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = dir
            .open_with(&name, &options)
            .map_err(|err| write_error(&name, &err))?;

        // From here on the guard owns cleanup of the half-written file.
        let staged = Self {
            dir,
            name,
            committed: false,
        };
        file.write_all(contents.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|err| write_error(&staged.name, &err))?;
        Ok(staged)
    }

    fn commit(mut self, target: &str) -> Result<(), SlotError> {
        replace(self.dir, &self.name, target).map_err(|err| write_error(target, &err))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedFile<'_> {
    fn drop(&mut self) {
        if !self.committed && self.dir.remove_file(&self.name).is_err() {
            // Leftover staging files are hidden and harmless.
        }
    }
}

/// Replaces `file_name` inside `dir` with `contents` atomically.
///
/// # Errors
///
/// Returns [`SlotError::WriteError`] when staging, syncing, or renaming fails.
pub(crate) fn replace_atomically(
    dir: &Dir,
    file_name: &str,
    contents: &str,
) -> Result<(), SlotError> {
    StagedFile::create(dir, file_name, contents)?.commit(file_name)?;
    sync_directory(dir);
    Ok(())
}

fn staging_name(target: &str) -> String {
    let counter = STAGING_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    format!(".{target}.staged.{}.{nanos}.{counter}", std::process::id())
}

fn write_error(name: &str, err: &io::Error) -> SlotError {
    SlotError::WriteError {
        path: Utf8Path::new(name).to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(windows)]
fn replace(dir: &Dir, staged: &str, target: &str) -> io::Result<()> {
    // Windows refuses to rename over an existing file.
    match dir.remove_file(target) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(staged, dir, target)
}

#[cfg(not(windows))]
fn replace(dir: &Dir, staged: &str, target: &str) -> io::Result<()> {
    dir.rename(staged, dir, target)
}

fn sync_directory(dir: &Dir) {
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        // Directory fsync is unsupported on some platforms.
    }
}

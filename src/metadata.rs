//! Metadata extraction: turns directory reads and stats into `Entry` values

use std::fs::{self, Metadata};
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use std::time::SystemTime;

use crate::entry::{Entry, FileMode};
use crate::error::{ListError, Result};

/// Build an entry from already-fetched metadata.
///
/// Symlink targets are read here; a link that cannot be read or whose target
/// cannot be stat'ed is still listed.
pub fn entry_from_metadata(name: String, path: &Path, meta: &Metadata) -> Entry {
    let mode = FileMode::from_raw(meta.mode());

    let (link_target, target_mode) = if mode.is_symlink() {
        let target = match fs::read_link(path) {
            Ok(t) => Some(t),
            Err(e) => {
                tracing::warn!("cannot read link '{}': {e}", path.display());
                None
            }
        };
        let target_mode = match fs::metadata(path) {
            Ok(m) => Some(FileMode::from_raw(m.mode())),
            Err(e) => {
                tracing::debug!("dangling link '{}': {e}", path.display());
                None
            }
        };
        (target, target_mode)
    } else {
        (None, None)
    };

    Entry {
        name,
        full_path: path.to_path_buf(),
        mode,
        size: meta.len(),
        modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        link_target,
        target_mode,
        owner_id: meta.uid(),
        group_id: meta.gid(),
        nlink: meta.nlink(),
        blocks: Some(meta.blocks()),
    }
}

/// Display name of a path argument, defaulting to the path itself for roots.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Build a single entry from an `lstat` of `path`.
///
/// Used for non-directory arguments, which bypass directory reads entirely.
pub fn stat_entry(path: &Path) -> Result<Entry> {
    let meta = fs::symlink_metadata(path).map_err(|e| ListError::from_io(path, e))?;
    Ok(entry_from_metadata(display_name(path), path, &meta))
}

/// Synthetic `.`/`..` entry carrying the (followed) metadata of `path`.
///
/// A stat failure yields a placeholder rather than aborting the listing.
fn synthetic_entry(name: &str, path: &Path) -> Entry {
    match fs::metadata(path) {
        Ok(meta) => entry_from_metadata(name.to_string(), path, &meta),
        Err(e) => {
            tracing::warn!("cannot stat '{}': {e}", path.display());
            Entry::placeholder(name, path)
        }
    }
}

/// List the contents of `dir`.
///
/// Dotfiles are skipped unless `show_all` is set, in which case the synthetic
/// `.` and `..` entries are added as well. The directory handle is drained and
/// closed before returning. Entries are returned in filesystem order.
pub fn list_directory(dir: &Path, show_all: bool) -> Result<Vec<Entry>> {
    let read_dir = fs::read_dir(dir).map_err(|e| ListError::from_io(dir, e))?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|e| ListError::from_io(dir, e))?;
        let name = dir_entry.file_name().to_string_lossy().to_string();
        if !show_all && name.starts_with('.') {
            continue;
        }

        let path = dir_entry.path();
        // DirEntry::metadata does not follow symlinks
        let entry = match dir_entry.metadata() {
            Ok(meta) => entry_from_metadata(name, &path, &meta),
            Err(e) => {
                tracing::warn!("cannot stat '{}': {e}", path.display());
                Entry::placeholder(name, path)
            }
        };
        entries.push(entry);
    }

    if show_all {
        entries.push(synthetic_entry(".", dir));
        entries.push(synthetic_entry("..", &dir.join("..")));
    }

    Ok(entries)
}

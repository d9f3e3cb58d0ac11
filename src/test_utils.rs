//! Test utilities for building temporary directory fixtures.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::os::unix::fs::{PermissionsExt, symlink};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;

/// A temporary directory for listing tests.
///
/// The directory is automatically cleaned up when dropped.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory (and its parents).
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Create a symlink at `link` (relative to the root) pointing at `target`.
    ///
    /// `target` is stored verbatim, so it may dangle.
    pub fn add_symlink(&self, target: &str, link: &str) -> PathBuf {
        let full_path = self.dir.path().join(link);
        symlink(target, &full_path).expect("Failed to create symlink");
        full_path
    }

    /// Set the permission bits (including setuid/setgid/sticky) of a path.
    pub fn set_mode(&self, path: &str, mode: u32) {
        let full_path = self.dir.path().join(path);
        fs::set_permissions(&full_path, fs::Permissions::from_mode(mode))
            .expect("Failed to set permissions");
    }

    /// Set the modification time of a file.
    pub fn set_modified(&self, path: &str, time: SystemTime) {
        let full_path = self.dir.path().join(path);
        fs::File::options()
            .write(true)
            .open(&full_path)
            .and_then(|f| f.set_modified(time))
            .expect("Failed to set modification time");
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

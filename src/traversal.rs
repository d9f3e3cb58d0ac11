//! Traversal: turns a list of paths into a sequence of listing blocks
//!
//! Each argument is stat'ed; directories are listed, sorted and rendered, and
//! with recursion enabled their subdirectories are visited depth-first in the
//! order the sort produced. Non-directory arguments are rendered as a single
//! entry without listing or sorting.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::entry::Entry;
use crate::error::{ListError, Result};
use crate::flags::Flags;
use crate::metadata::{list_directory, stat_entry};
use crate::sort::sort_entries;

/// Receives listing blocks as the traversal produces them.
pub trait ListingOutput {
    /// A directory's sorted entries; `header` asks for a `path:` line.
    fn directory(&mut self, path: &Path, header: bool, entries: &[Entry]) -> io::Result<()>;

    /// A non-directory argument.
    fn file(&mut self, entry: &Entry) -> io::Result<()>;

    fn finish(&mut self) -> io::Result<()>;
}

/// Drives listing, sorting and rendering for a set of path arguments.
pub struct Lister {
    flags: Flags,
    ignore: Vec<Pattern>,
}

impl Lister {
    pub fn new(flags: Flags) -> Self {
        Self {
            flags,
            ignore: Vec::new(),
        }
    }

    /// Hide children whose names match any of the glob `patterns`.
    ///
    /// Patterns that fail to parse are reported and skipped.
    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Self {
        for p in patterns {
            match Pattern::new(p) {
                Ok(pattern) => self.ignore.push(pattern),
                Err(e) => tracing::warn!("ignoring invalid pattern '{p}': {e}"),
            }
        }
        self
    }

    /// Whether a directory block gets a `path:` header.
    fn wants_header(&self, paths: &[PathBuf]) -> bool {
        paths.len() > 1
            || self.flags.recursive
            || paths.first().is_some_and(|p| p != Path::new("."))
    }

    /// List every path in order, stopping at the first fatal error.
    ///
    /// Paths are visited in the order given; callers sort multiple arguments
    /// beforehand. The output is finished even when listing fails, so blocks
    /// produced before the error are still written.
    pub fn run<O: ListingOutput>(&self, paths: &[PathBuf], output: &mut O) -> Result<()> {
        let listed = self.list_paths(paths, output);
        let finished = output.finish();
        listed?;
        finished?;
        Ok(())
    }

    fn list_paths<O: ListingOutput>(&self, paths: &[PathBuf], output: &mut O) -> Result<()> {
        let header = self.wants_header(paths);

        for path in paths {
            let meta = fs::metadata(path).map_err(|e| ListError::from_io(path, e))?;
            if meta.is_dir() {
                self.walk(path, header, output)?;
            } else {
                let entry = stat_entry(path)?;
                output.file(&entry)?;
            }
        }
        Ok(())
    }

    /// List one directory argument and, when recursive, its subtree.
    ///
    /// Pending subdirectories are kept on an explicit stack, so only one
    /// directory handle is open at a time and depth does not grow the call
    /// stack. Symlinked directories are never descended into.
    fn walk<O: ListingOutput>(&self, root: &Path, header: bool, output: &mut O) -> Result<()> {
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            tracing::debug!("listing '{}'", dir.display());
            let entries = self.list(&dir)?;
            output.directory(&dir, header, &entries)?;

            if self.flags.recursive {
                let children = entries
                    .iter()
                    .filter(|e| e.is_dir() && !e.is_dot_entry())
                    .map(|e| e.full_path.clone());
                // Reversed so the first child in sort order is popped first
                let mut children: Vec<PathBuf> = children.collect();
                children.reverse();
                pending.extend(children);
            }
        }
        Ok(())
    }

    /// Read, filter and sort one directory.
    fn list(&self, dir: &Path) -> Result<Vec<Entry>> {
        let mut entries = list_directory(dir, self.flags.show_all)?;
        if !self.ignore.is_empty() {
            entries.retain(|e| {
                e.is_dot_entry() || !self.ignore.iter().any(|p| p.matches(&e.name))
            });
        }
        sort_entries(&mut entries, &self.flags);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestDir;

    /// Records what the traversal emitted.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        finished: bool,
    }

    impl ListingOutput for Recorder {
        fn directory(&mut self, path: &Path, header: bool, entries: &[Entry]) -> io::Result<()> {
            let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
            let h = if header { "H " } else { "" };
            self.events
                .push(format!("{h}{}: {}", path.display(), names.join(",")));
            Ok(())
        }

        fn file(&mut self, entry: &Entry) -> io::Result<()> {
            self.events.push(format!("file {}", entry.name));
            Ok(())
        }

        fn finish(&mut self) -> io::Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    fn rel(dir: &TestDir, events: &[String]) -> Vec<String> {
        let root = dir.path().display().to_string();
        events.iter().map(|e| e.replace(&root, "ROOT")).collect()
    }

    #[test]
    fn test_single_directory_default_flags() {
        let dir = TestDir::new();
        dir.add_file("b.txt", "b");
        dir.add_file("A.txt", "a");
        dir.add_file(".hidden", "h");

        let mut rec = Recorder::default();
        Lister::new(Flags::default())
            .run(&[dir.path().to_path_buf()], &mut rec)
            .unwrap();
        assert!(rec.finished);
        assert_eq!(rel(&dir, &rec.events), vec!["H ROOT: A.txt,b.txt"]);
    }

    #[test]
    fn test_recursion_is_depth_first_preorder_in_sort_order() {
        let dir = TestDir::new();
        dir.add_file("b/inner/deep.txt", "");
        dir.add_file("a/x.txt", "");
        dir.add_file("C/y.txt", "");
        dir.add_file("top.txt", "");

        let flags = Flags {
            recursive: true,
            ..Default::default()
        };
        let mut rec = Recorder::default();
        Lister::new(flags)
            .run(&[dir.path().to_path_buf()], &mut rec)
            .unwrap();
        assert_eq!(
            rel(&dir, &rec.events),
            vec![
                "H ROOT: a,b,C,top.txt",
                "H ROOT/a: x.txt",
                "H ROOT/b: inner",
                "H ROOT/b/inner: deep.txt",
                "H ROOT/C: y.txt",
            ]
        );
    }

    #[test]
    fn test_recursion_skips_dot_entries_and_symlinked_dirs() {
        let dir = TestDir::new();
        dir.add_file("real/f.txt", "");
        dir.add_symlink("real", "alias");

        let flags = Flags {
            recursive: true,
            show_all: true,
            ..Default::default()
        };
        let mut rec = Recorder::default();
        Lister::new(flags)
            .run(&[dir.path().to_path_buf()], &mut rec)
            .unwrap();
        assert_eq!(
            rel(&dir, &rec.events),
            vec!["H ROOT: .,..,alias,real", "H ROOT/real: .,..,f.txt"]
        );
    }

    #[test]
    fn test_non_directory_argument() {
        let dir = TestDir::new();
        let file = dir.add_file("only.txt", "x");

        let mut rec = Recorder::default();
        Lister::new(Flags::default()).run(&[file], &mut rec).unwrap();
        assert_eq!(rec.events, vec!["file only.txt"]);
    }

    #[test]
    fn test_missing_path_is_fatal() {
        let dir = TestDir::new();
        let mut rec = Recorder::default();
        let err = Lister::new(Flags::default())
            .run(&[dir.path().join("missing")], &mut rec)
            .unwrap_err();
        assert!(matches!(err, ListError::NotFound { .. }));
        assert!(rec.finished);
    }

    #[test]
    fn test_blocks_before_fatal_error_are_kept() {
        let dir = TestDir::new();
        dir.add_file("a/one.txt", "");

        let mut rec = Recorder::default();
        let err = Lister::new(Flags::default())
            .run(&[dir.path().join("a"), dir.path().join("missing")], &mut rec)
            .unwrap_err();
        assert!(matches!(err, ListError::NotFound { .. }));
        assert!(rec.finished);
        assert_eq!(rel(&dir, &rec.events), vec!["H ROOT/a: one.txt"]);
    }

    #[test]
    fn test_ignore_patterns_filter_children() {
        let dir = TestDir::new();
        dir.add_file("keep.rs", "");
        dir.add_file("drop.o", "");
        dir.add_file(".also.o", "");

        let flags = Flags {
            show_all: true,
            ..Default::default()
        };
        let mut rec = Recorder::default();
        Lister::new(flags)
            .with_ignore_patterns(&["*.o".to_string(), "[".to_string()])
            .run(&[dir.path().to_path_buf()], &mut rec)
            .unwrap();
        assert_eq!(rel(&dir, &rec.events), vec!["H ROOT: .,..,keep.rs"]);
    }

    #[test]
    fn test_header_rules() {
        let lister = Lister::new(Flags::default());
        assert!(!lister.wants_header(&[PathBuf::from(".")]));
        assert!(lister.wants_header(&[PathBuf::from("src")]));
        assert!(lister.wants_header(&[PathBuf::from("."), PathBuf::from("src")]));

        let recursive = Lister::new(Flags {
            recursive: true,
            ..Default::default()
        });
        assert!(recursive.wants_header(&[PathBuf::from(".")]));
    }
}

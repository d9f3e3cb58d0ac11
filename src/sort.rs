//! Entry ordering

use std::cmp::Ordering;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

use crate::entry::Entry;
use crate::flags::Flags;

/// Case-insensitive key with a single leading `.` removed.
fn name_key(name: &str) -> String {
    name.strip_prefix('.').unwrap_or(name).to_lowercase()
}

/// Default name comparator.
///
/// `.bashrc` compares as `bashrc`; names whose keys are equal are ordered by
/// their case-sensitive original so the order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    name_key(a).cmp(&name_key(b)).then_with(|| a.cmp(b))
}

/// Newest first, then by name.
fn compare_by_time(a: &Entry, b: &Entry) -> Ordering {
    b.modified
        .cmp(&a.modified)
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Order `entries` in place according to `flags`.
///
/// Reversal is applied after the comparator and is independent of it.
pub fn sort_entries(entries: &mut [Entry], flags: &Flags) {
    if flags.sort_by_time {
        entries.sort_by(compare_by_time);
    } else {
        entries.sort_by(|a, b| compare_names(&a.name, &b.name));
    }

    if flags.reverse {
        entries.reverse();
    }
}

/// Owned variant of [`sort_entries`].
pub fn order(mut entries: Vec<Entry>, flags: &Flags) -> Vec<Entry> {
    sort_entries(&mut entries, flags);
    entries
}

/// Sort top-level path arguments by plain byte order.
pub fn sort_paths(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| a.as_os_str().as_bytes().cmp(b.as_os_str().as_bytes()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    fn entry(name: &str, secs: u64) -> Entry {
        let mut e = Entry::placeholder(name, name);
        e.modified = SystemTime::UNIX_EPOCH + Duration::from_secs(secs);
        e
    }

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_default_order_is_case_insensitive() {
        let entries = vec![entry("b.txt", 1), entry("A.txt", 2), entry("c", 0)];
        let sorted = order(entries, &Flags::default());
        assert_eq!(names(&sorted), vec!["A.txt", "b.txt", "c"]);
    }

    #[test]
    fn test_dot_prefix_is_ignored() {
        let entries = vec![
            entry("zeta", 0),
            entry(".bashrc", 0),
            entry("alpha", 0),
            entry("..", 0),
            entry(".", 0),
        ];
        let sorted = order(entries, &Flags::default());
        assert_eq!(names(&sorted), vec![".", "..", "alpha", ".bashrc", "zeta"]);
    }

    #[test]
    fn test_case_ties_broken_by_original_name() {
        assert_eq!(compare_names("README", "readme"), Ordering::Less);
        assert_eq!(compare_names("readme", "README"), Ordering::Greater);
        assert_eq!(compare_names(".x", "x"), Ordering::Less);
        assert_eq!(compare_names("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_order_independent_of_input_permutation() {
        let base = ["Foo", "foo", "FOO", ".foo", "bar", "Bar"];
        let mut expected: Option<Vec<String>> = None;
        for rotate in 0..base.len() {
            let mut input: Vec<Entry> = base.iter().map(|n| entry(n, 0)).collect();
            input.rotate_left(rotate);
            let sorted = order(input, &Flags::default());
            let got: Vec<String> = sorted.into_iter().map(|e| e.name).collect();
            match &expected {
                Some(exp) => assert_eq!(&got, exp),
                None => expected = Some(got),
            }
        }
    }

    #[test]
    fn test_sort_by_time_newest_first() {
        let flags = Flags {
            sort_by_time: true,
            ..Default::default()
        };
        let entries = vec![entry("b.txt", 10), entry("A.txt", 20), entry(".hidden", 5)];
        let sorted = order(entries, &flags);
        assert_eq!(names(&sorted), vec!["A.txt", "b.txt", ".hidden"]);
    }

    #[test]
    fn test_sort_by_time_ties_use_name() {
        let flags = Flags {
            sort_by_time: true,
            ..Default::default()
        };
        let entries = vec![entry("b", 7), entry("C", 7), entry("a", 7), entry("new", 9)];
        let sorted = order(entries, &flags);
        assert_eq!(names(&sorted), vec!["new", "a", "b", "C"]);
    }

    #[test]
    fn test_reverse_composes_with_both_modes() {
        let entries = vec![entry("a", 1), entry("b", 3), entry("c", 2)];

        let reversed = order(
            entries.clone(),
            &Flags {
                reverse: true,
                ..Default::default()
            },
        );
        assert_eq!(names(&reversed), vec!["c", "b", "a"]);

        let reversed_time = order(
            entries,
            &Flags {
                reverse: true,
                sort_by_time: true,
                ..Default::default()
            },
        );
        assert_eq!(names(&reversed_time), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_reverse_is_its_own_inverse() {
        let entries = vec![entry("q", 1), entry("W", 2), entry(".e", 3), entry("r", 4)];
        let baseline = order(entries.clone(), &Flags::default());
        let mut twice = order(
            entries,
            &Flags {
                reverse: true,
                ..Default::default()
            },
        );
        twice.reverse();
        assert_eq!(names(&twice), names(&baseline));
    }

    #[test]
    fn test_sort_paths_byte_order() {
        let mut paths = vec![
            PathBuf::from("b"),
            PathBuf::from("B"),
            PathBuf::from("a/b"),
            PathBuf::from("a-c"),
        ];
        sort_paths(&mut paths);
        let got: Vec<_> = paths.iter().map(|p| p.to_string_lossy().to_string()).collect();
        assert_eq!(got, vec!["B", "a-c", "a/b", "b"]);
    }
}

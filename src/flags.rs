//! Listing flags and lenient short-option handling
//!
//! Short options may be bundled (`-laR`). Characters that are not recognized are
//! stripped from their bundle before argument parsing and reported back to the
//! caller, as are unrecognized long options, so an unknown flag is a warning
//! rather than a usage error.

use std::ffi::OsString;

/// Immutable listing configuration, produced once per invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// `-a`: include dotfiles and the synthetic `.`/`..` entries
    pub show_all: bool,
    /// `-l`: detailed columns
    pub long_listing: bool,
    /// `-R`: descend into subdirectories
    pub recursive: bool,
    /// `-r`: invert the final order
    pub reverse: bool,
    /// `-t`: newest first instead of by name
    pub sort_by_time: bool,
}

/// Short options that take no value.
const BOOLEAN_SHORTS: &[char] = &['l', 'R', 'a', 'r', 't', 'V'];

/// Short options that take a value (attached or as the next argument).
const VALUE_SHORTS: &[char] = &['I'];

/// Long options that take no value.
const BOOLEAN_LONGS: &[&str] = &[
    "--all",
    "--recursive",
    "--reverse",
    "--json",
    "--compact",
    "--help",
    "--version",
];

/// Long options that take a value as the next argument when no `=` is given.
const VALUE_LONGS: &[&str] = &["--color", "--ignore"];

/// Remove unrecognized short-option characters and long options.
///
/// Returns the filtered argument list (program name included) and the dropped
/// flags as written (`-x`, `--bogus`), in the order they appeared.
pub fn strip_unknown_flags<I>(args: I) -> (Vec<OsString>, Vec<String>)
where
    I: IntoIterator<Item = OsString>,
{
    let mut iter = args.into_iter();
    let mut kept: Vec<OsString> = iter.next().into_iter().collect();
    let mut unknown = Vec::new();
    let mut only_paths = false;
    let mut expect_value = false;

    for arg in iter {
        if only_paths || expect_value {
            expect_value = false;
            kept.push(arg);
            continue;
        }

        let Some(s) = arg.to_str() else {
            kept.push(arg);
            continue;
        };

        if s == "--" {
            only_paths = true;
            kept.push(arg);
            continue;
        }

        if s.starts_with("--") {
            let (name, inline_value) = match s.split_once('=') {
                Some((name, _)) => (name, true),
                None => (s, false),
            };
            if VALUE_LONGS.iter().any(|opt| *opt == name) {
                expect_value = !inline_value;
                kept.push(arg);
            } else if BOOLEAN_LONGS.iter().any(|opt| *opt == name) {
                kept.push(arg);
            } else {
                unknown.push(name.to_string());
            }
            continue;
        }

        if s.len() < 2 || !s.starts_with('-') {
            kept.push(arg);
            continue;
        }

        let mut bundle = String::from("-");
        for (i, c) in s[1..].char_indices() {
            if VALUE_SHORTS.contains(&c) {
                let rest = &s[1 + i + c.len_utf8()..];
                bundle.push(c);
                bundle.push_str(rest);
                expect_value = rest.is_empty();
                break;
            } else if BOOLEAN_SHORTS.contains(&c) {
                bundle.push(c);
            } else {
                unknown.push(format!("-{c}"));
            }
        }

        if bundle.len() > 1 {
            kept.push(OsString::from(bundle));
        }
    }

    (kept, unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        std::iter::once("lister")
            .chain(list.iter().copied())
            .map(OsString::from)
            .collect()
    }

    fn strs(v: &[OsString]) -> Vec<String> {
        v.iter().map(|s| s.to_string_lossy().to_string()).collect()
    }

    #[test]
    fn test_known_bundles_pass_through() {
        let (kept, unknown) = strip_unknown_flags(args(&["-laR", "dir"]));
        assert_eq!(strs(&kept), vec!["lister", "-laR", "dir"]);
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_unknown_chars_are_dropped() {
        let (kept, unknown) = strip_unknown_flags(args(&["-lxz", "-q"]));
        assert_eq!(strs(&kept), vec!["lister", "-l"]);
        assert_eq!(unknown, vec!["-x", "-z", "-q"]);
    }

    #[test]
    fn test_help_short_is_not_a_listing_flag() {
        let (kept, unknown) = strip_unknown_flags(args(&["-lh"]));
        assert_eq!(strs(&kept), vec!["lister", "-l"]);
        assert_eq!(unknown, vec!["-h"]);
    }

    #[test]
    fn test_unknown_long_options_are_dropped() {
        let (kept, unknown) =
            strip_unknown_flags(args(&["--bogus", "-l", "--x=1", "--all", "dir"]));
        assert_eq!(strs(&kept), vec!["lister", "-l", "--all", "dir"]);
        assert_eq!(unknown, vec!["--bogus", "--x"]);
    }

    #[test]
    fn test_long_value_given_inline_does_not_consume_next() {
        let (kept, unknown) = strip_unknown_flags(args(&["--ignore=*.o", "--nope"]));
        assert_eq!(strs(&kept), vec!["lister", "--ignore=*.o"]);
        assert_eq!(unknown, vec!["--nope"]);
    }

    #[test]
    fn test_lone_dash_and_double_dash() {
        let (kept, unknown) = strip_unknown_flags(args(&["-", "--", "-zz"]));
        assert_eq!(strs(&kept), vec!["lister", "-", "--", "-zz"]);
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_value_options_keep_their_values() {
        let (kept, unknown) =
            strip_unknown_flags(args(&["-lI", "-weird*", "-I*.o", "--color", "-x"]));
        assert_eq!(
            strs(&kept),
            vec!["lister", "-lI", "-weird*", "-I*.o", "--color", "-x"]
        );
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_long_options_untouched() {
        let (kept, unknown) =
            strip_unknown_flags(args(&["--json", "--color=never", "--ignore", "--x", "path"]));
        assert_eq!(
            strs(&kept),
            vec!["lister", "--json", "--color=never", "--ignore", "--x", "path"]
        );
        assert!(unknown.is_empty());
    }
}

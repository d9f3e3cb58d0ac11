//! Lister - a directory lister in the spirit of `ls`

pub mod entry;
pub mod error;
pub mod flags;
pub mod identity;
pub mod metadata;
pub mod output;
pub mod sort;
pub mod traversal;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use entry::{Entry, EntryKind, FileMode};
pub use error::{ListError, Result};
pub use flags::{Flags, strip_unknown_flags};
pub use identity::{FixedIdentities, IdentityCache, IdentityLookup, SystemIdentities};
pub use metadata::{list_directory, stat_entry};
pub use output::{JsonFormatter, OutputConfig, Renderer, TextFormatter};
pub use sort::{compare_names, order, sort_entries, sort_paths};
pub use traversal::{Lister, ListingOutput};

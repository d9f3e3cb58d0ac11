//! JSON output formatting

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::entry::Entry;
use crate::identity::IdentityCache;
use crate::traversal::ListingOutput;

/// One entry as serialized in JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct JsonEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: &'static str,
    pub mode: String,
    pub size: u64,
    pub nlink: u64,
    pub owner: String,
    pub group: String,
    /// Absent for entries whose metadata could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Local>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_target: Option<PathBuf>,
}

impl JsonEntry {
    pub fn new(entry: &Entry, identities: &mut IdentityCache) -> Self {
        let known = !entry.is_placeholder();
        Self {
            name: entry.name.clone(),
            path: entry.full_path.clone(),
            kind: entry.mode.kind.as_str(),
            mode: entry.mode.to_string(),
            size: entry.size,
            nlink: entry.nlink,
            owner: if known {
                identities.user(entry.owner_id).to_string()
            } else {
                String::new()
            },
            group: if known {
                identities.group(entry.group_id).to_string()
            } else {
                String::new()
            },
            modified: known.then(|| entry.modified.into()),
            link_target: entry.link_target.clone(),
        }
    }
}

/// One listed directory (or a single non-directory argument).
#[derive(Debug, Clone, Serialize)]
pub struct JsonListing {
    pub path: PathBuf,
    pub entries: Vec<JsonEntry>,
}

/// Collects the whole run and prints it as one pretty JSON array on finish.
pub struct JsonFormatter<W: Write> {
    out: W,
    identities: IdentityCache,
    listings: Vec<JsonListing>,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(out: W, identities: IdentityCache) -> Self {
        Self {
            out,
            identities,
            listings: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ListingOutput for JsonFormatter<W> {
    fn directory(&mut self, path: &Path, _header: bool, entries: &[Entry]) -> io::Result<()> {
        let entries = entries
            .iter()
            .map(|e| JsonEntry::new(e, &mut self.identities))
            .collect();
        self.listings.push(JsonListing {
            path: path.to_path_buf(),
            entries,
        });
        Ok(())
    }

    fn file(&mut self, entry: &Entry) -> io::Result<()> {
        let json = JsonEntry::new(entry, &mut self.identities);
        self.listings.push(JsonListing {
            path: entry.full_path.clone(),
            entries: vec![json],
        });
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &self.listings).map_err(io::Error::other)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

//! Long-format rendering

use std::io::{self, Write};

use chrono::{DateTime, Local};
use termcolor::WriteColor;

use crate::entry::Entry;
use crate::identity::IdentityCache;

use super::colors::write_colored;
use super::utils::{format_timestamp, total_blocks};

/// Pre-formatted metadata columns of one long-listing line.
struct LongRow {
    mode: String,
    nlink: String,
    owner: String,
    group: String,
    size: String,
    time: String,
}

impl LongRow {
    fn new(entry: &Entry, identities: &mut IdentityCache, now: DateTime<Local>) -> Self {
        if entry.is_placeholder() {
            let unknown = || "?".to_string();
            return Self {
                mode: entry.mode.to_string(),
                nlink: unknown(),
                owner: unknown(),
                group: unknown(),
                size: unknown(),
                time: unknown(),
            };
        }
        Self {
            mode: entry.mode.to_string(),
            nlink: entry.nlink.to_string(),
            owner: identities.user(entry.owner_id).to_string(),
            group: identities.group(entry.group_id).to_string(),
            size: entry.size.to_string(),
            time: format_timestamp(entry.modified, now),
        }
    }
}

/// Column widths across a block.
#[derive(Default)]
struct Widths {
    nlink: usize,
    owner: usize,
    group: usize,
    size: usize,
}

impl Widths {
    fn fit(rows: &[LongRow]) -> Self {
        rows.iter().fold(Self::default(), |w, r| Self {
            nlink: w.nlink.max(r.nlink.chars().count()),
            owner: w.owner.max(r.owner.chars().count()),
            group: w.group.max(r.group.chars().count()),
            size: w.size.max(r.size.chars().count()),
        })
    }
}

/// Write the `total` line and one detail line per entry.
pub fn write_long<W: WriteColor + ?Sized>(
    out: &mut W,
    entries: &[Entry],
    identities: &mut IdentityCache,
    now: DateTime<Local>,
) -> io::Result<()> {
    writeln!(out, "total {}", total_blocks(entries))?;

    let rows: Vec<LongRow> = entries
        .iter()
        .map(|e| LongRow::new(e, identities, now))
        .collect();
    let w = Widths::fit(&rows);

    for (entry, row) in entries.iter().zip(&rows) {
        write!(
            out,
            "{} {:>nw$} {:<ow$} {:<gw$} {:>sw$} {} ",
            row.mode,
            row.nlink,
            row.owner,
            row.group,
            row.size,
            row.time,
            nw = w.nlink,
            ow = w.owner,
            gw = w.group,
            sw = w.size,
        )?;
        write_name(out, entry)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Colored name, plus ` -> target` for symlinks.
fn write_name<W: WriteColor + ?Sized>(out: &mut W, entry: &Entry) -> io::Result<()> {
    let mode = (!entry.is_placeholder()).then_some(entry.mode);
    write_colored(out, &entry.name, mode)?;

    if let Some(target) = entry.link_target.as_ref().filter(|_| entry.mode.is_symlink()) {
        write!(out, " -> ")?;
        write_colored(out, &target.to_string_lossy(), entry.target_mode)?;
    }
    Ok(())
}

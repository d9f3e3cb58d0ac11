//! Short-format rendering

use std::io::{self, Write};

use termcolor::WriteColor;

use crate::entry::Entry;

use super::colors::write_colored;

/// Write entry names, one per line, or all on one line in compact mode.
pub fn write_short<W: WriteColor + ?Sized>(
    out: &mut W,
    entries: &[Entry],
    compact: bool,
) -> io::Result<()> {
    if compact {
        if entries.is_empty() {
            return Ok(());
        }
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                write!(out, "  ")?;
            }
            write_colored(out, &entry.name, Some(entry.mode))?;
        }
        writeln!(out)
    } else {
        for entry in entries {
            write_colored(out, &entry.name, Some(entry.mode))?;
            writeln!(out)?;
        }
        Ok(())
    }
}

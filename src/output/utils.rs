//! Shared helpers for long-format rendering

use std::time::SystemTime;

use chrono::{DateTime, Local, Months};

use crate::entry::Entry;

/// Format a modification time the way a long listing shows it.
///
/// Times earlier than six calendar months before `now` show the year
/// (`Mon DD  YYYY`); everything else, future times included, shows the clock
/// (`Mon DD HH:MM`).
pub fn format_timestamp(modified: SystemTime, now: DateTime<Local>) -> String {
    let modified: DateTime<Local> = modified.into();
    let is_old = now
        .checked_sub_months(Months::new(6))
        .is_some_and(|cutoff| modified < cutoff);

    if is_old {
        modified.format("%b %e  %Y").to_string()
    } else {
        modified.format("%b %e %H:%M").to_string()
    }
}

/// Sum of on-disk usage in 1024-byte units, rounded up.
///
/// Entries without block metadata contribute nothing.
pub fn total_blocks(entries: &[Entry]) -> u64 {
    let blocks_512: u64 = entries.iter().filter_map(|e| e.blocks).sum();
    blocks_512.div_ceil(2)
}

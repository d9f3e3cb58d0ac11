//! Listing formatting and display
//!
//! # Module Structure
//!
//! - `config` - Output configuration types
//! - `colors` - Mode to color mapping
//! - `utils` - Timestamp formatting and block totals
//! - `short` / `long` - The two text layouts
//! - `text` - Streaming text formatter used by the traversal
//! - `json` - JSON output

mod colors;
mod config;
mod json;
mod long;
mod short;
mod text;
mod utils;

use std::io;

use chrono::{DateTime, Local};
use termcolor::{Buffer, WriteColor};

use crate::entry::Entry;
use crate::flags::Flags;
use crate::identity::IdentityCache;

pub use colors::{color_for, write_colored};
pub use config::OutputConfig;
pub use json::{JsonEntry, JsonFormatter, JsonListing};
pub use text::TextFormatter;
pub use utils::{format_timestamp, total_blocks};

/// Turns a sequence of entries into a text block.
pub struct Renderer {
    config: OutputConfig,
    identities: IdentityCache,
    now: DateTime<Local>,
}

impl Renderer {
    pub fn new(config: OutputConfig) -> Self {
        Self {
            config,
            identities: IdentityCache::system(),
            now: Local::now(),
        }
    }

    /// Resolve owner and group names through `identities`.
    pub fn with_identities(mut self, identities: IdentityCache) -> Self {
        self.identities = identities;
        self
    }

    /// Reference time for the recent/old timestamp decision.
    pub fn with_now(mut self, now: DateTime<Local>) -> Self {
        self.now = now;
        self
    }

    /// Render `entries` in the layout selected by `flags`.
    pub fn render<W: WriteColor + ?Sized>(
        &mut self,
        out: &mut W,
        entries: &[Entry],
        flags: &Flags,
    ) -> io::Result<()> {
        if flags.long_listing {
            long::write_long(out, entries, &mut self.identities, self.now)
        } else {
            short::write_short(out, entries, self.config.compact)
        }
    }

    /// Render into a string, with ANSI escapes when color is enabled.
    pub fn render_to_string(&mut self, entries: &[Entry], flags: &Flags) -> io::Result<String> {
        let mut buf = if self.config.use_color {
            Buffer::ansi()
        } else {
            Buffer::no_color()
        };
        self.render(&mut buf, entries, flags)?;
        Ok(String::from_utf8_lossy(buf.as_slice()).to_string())
    }
}

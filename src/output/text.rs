//! Streaming text formatter
//!
//! Writes each listing block as soon as the traversal produces it.

use std::io::{self, Write};
use std::path::Path;

use termcolor::WriteColor;

use crate::entry::Entry;
use crate::flags::Flags;
use crate::traversal::ListingOutput;

use super::Renderer;

/// Text output: optional `path:` header, then the rendered block.
/// Consecutive blocks are separated by a blank line.
pub struct TextFormatter<W: WriteColor> {
    out: W,
    renderer: Renderer,
    flags: Flags,
    blocks_written: usize,
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(out: W, renderer: Renderer, flags: Flags) -> Self {
        Self {
            out,
            renderer,
            flags,
            blocks_written: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn separate(&mut self) -> io::Result<()> {
        if self.blocks_written > 0 {
            writeln!(self.out)?;
        }
        self.blocks_written += 1;
        Ok(())
    }
}

impl<W: WriteColor> ListingOutput for TextFormatter<W> {
    fn directory(&mut self, path: &Path, header: bool, entries: &[Entry]) -> io::Result<()> {
        self.separate()?;
        if header {
            writeln!(self.out, "{}:", path.display())?;
        }
        self.renderer.render(&mut self.out, entries, &self.flags)
    }

    fn file(&mut self, entry: &Entry) -> io::Result<()> {
        self.separate()?;
        self.renderer
            .render(&mut self.out, std::slice::from_ref(entry), &self.flags)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

//! Mode to color mapping

use std::io::{self, Write};

use termcolor::{Color, ColorSpec, WriteColor};

use crate::entry::{EntryKind, FileMode};

fn bold(color: Color) -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(color)).set_bold(true);
    spec
}

/// Color for a name with the given mode, or `None` for plain files.
pub fn color_for(mode: FileMode) -> Option<ColorSpec> {
    match mode.kind {
        EntryKind::Symlink => Some(bold(Color::Cyan)),
        EntryKind::Directory => Some(bold(Color::Blue)),
        _ if mode.is_executable() => Some(bold(Color::Green)),
        _ if mode.is_device() => Some(bold(Color::Yellow)),
        _ => None,
    }
}

/// Write `text` colored per `mode`; `None` writes it uncolored.
pub fn write_colored<W: WriteColor + ?Sized>(
    out: &mut W,
    text: &str,
    mode: Option<FileMode>,
) -> io::Result<()> {
    match mode.and_then(color_for) {
        Some(spec) => {
            out.set_color(&spec)?;
            write!(out, "{}", text)?;
            out.reset()
        }
        None => write!(out, "{}", text),
    }
}

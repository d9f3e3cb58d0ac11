//! The normalized entry record passed between every listing stage
//!
//! An `Entry` is built once from a directory read or a direct stat and is never
//! mutated afterwards; sorting only permutes positions.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::SystemTime;

const S_IFMT: u32 = 0o170_000;
const S_IFSOCK: u32 = 0o140_000;
const S_IFLNK: u32 = 0o120_000;
const S_IFREG: u32 = 0o100_000;
const S_IFBLK: u32 = 0o060_000;
const S_IFDIR: u32 = 0o040_000;
const S_IFCHR: u32 = 0o020_000;
const S_IFIFO: u32 = 0o010_000;

pub const SETUID: u16 = 0o4000;
pub const SETGID: u16 = 0o2000;
pub const STICKY: u16 = 0o1000;

/// Mask of the permission and special bits kept in a `FileMode`.
pub const PERMISSION_MASK: u16 = 0o7777;

/// File type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Regular,
    Directory,
    Symlink,
    BlockDevice,
    CharDevice,
    NamedPipe,
    Socket,
    /// Metadata could not be read; only used by placeholder entries.
    Unknown,
}

impl EntryKind {
    /// The type character used in the first column of a long listing.
    pub fn type_char(self) -> char {
        match self {
            EntryKind::Regular => '-',
            EntryKind::Directory => 'd',
            EntryKind::Symlink => 'l',
            EntryKind::BlockDevice => 'b',
            EntryKind::CharDevice => 'c',
            EntryKind::NamedPipe => 'p',
            EntryKind::Socket => 's',
            EntryKind::Unknown => '?',
        }
    }

    fn from_type_char(c: char) -> Option<Self> {
        Some(match c {
            '-' => EntryKind::Regular,
            'd' => EntryKind::Directory,
            'l' => EntryKind::Symlink,
            'b' => EntryKind::BlockDevice,
            'c' => EntryKind::CharDevice,
            'p' => EntryKind::NamedPipe,
            's' => EntryKind::Socket,
            _ => return None,
        })
    }

    /// Lowercase name used in JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Regular => "file",
            EntryKind::Directory => "directory",
            EntryKind::Symlink => "symlink",
            EntryKind::BlockDevice => "block_device",
            EntryKind::CharDevice => "char_device",
            EntryKind::NamedPipe => "pipe",
            EntryKind::Socket => "socket",
            EntryKind::Unknown => "unknown",
        }
    }
}

/// File type plus the twelve permission bits (rwx triplets, setuid, setgid, sticky).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileMode {
    pub kind: EntryKind,
    pub bits: u16,
}

impl FileMode {
    pub fn new(kind: EntryKind, bits: u16) -> Self {
        Self {
            kind,
            bits: bits & PERMISSION_MASK,
        }
    }

    /// Decode a raw `st_mode` value.
    pub fn from_raw(mode: u32) -> Self {
        let kind = match mode & S_IFMT {
            S_IFSOCK => EntryKind::Socket,
            S_IFLNK => EntryKind::Symlink,
            S_IFREG => EntryKind::Regular,
            S_IFBLK => EntryKind::BlockDevice,
            S_IFDIR => EntryKind::Directory,
            S_IFCHR => EntryKind::CharDevice,
            S_IFIFO => EntryKind::NamedPipe,
            _ => EntryKind::Unknown,
        };
        Self::new(kind, (mode & u32::from(PERMISSION_MASK)) as u16)
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }

    pub fn is_device(&self) -> bool {
        matches!(self.kind, EntryKind::BlockDevice | EntryKind::CharDevice)
    }

    /// True when any execute bit is set.
    pub fn is_executable(&self) -> bool {
        self.bits & 0o111 != 0
    }
}

/// Execute-position character for one triplet.
fn exec_char(execute: bool, special: bool, lower: char, upper: char) -> char {
    match (execute, special) {
        (true, true) => lower,
        (false, true) => upper,
        (true, false) => 'x',
        (false, false) => '-',
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == EntryKind::Unknown {
            return f.write_str("??????????");
        }

        let b = self.bits;
        let mut s = String::with_capacity(10);
        s.push(self.kind.type_char());

        // (read, write, execute, special, lowercase, uppercase)
        let triplets = [
            (0o400, 0o200, 0o100, SETUID, 's', 'S'),
            (0o040, 0o020, 0o010, SETGID, 's', 'S'),
            (0o004, 0o002, 0o001, STICKY, 't', 'T'),
        ];
        for (r, w, x, special, lower, upper) in triplets {
            s.push(if b & r != 0 { 'r' } else { '-' });
            s.push(if b & w != 0 { 'w' } else { '-' });
            s.push(exec_char(b & x != 0, b & special != 0, lower, upper));
        }
        f.write_str(&s)
    }
}

/// Error returned when a permission string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid permission string: {0:?}")]
pub struct ParseModeError(String);

impl FromStr for FileMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseModeError(s.to_string());
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 10 {
            return Err(err());
        }

        let kind = EntryKind::from_type_char(chars[0]).ok_or_else(err)?;
        let mut bits = 0u16;
        let triplets = [
            (0o400, 0o200, 0o100, SETUID, 's', 'S'),
            (0o040, 0o020, 0o010, SETGID, 's', 'S'),
            (0o004, 0o002, 0o001, STICKY, 't', 'T'),
        ];
        for (i, (r, w, x, special, lower, upper)) in triplets.into_iter().enumerate() {
            let base = 1 + i * 3;
            match chars[base] {
                'r' => bits |= r,
                '-' => {}
                _ => return Err(err()),
            }
            match chars[base + 1] {
                'w' => bits |= w,
                '-' => {}
                _ => return Err(err()),
            }
            match chars[base + 2] {
                'x' => bits |= x,
                '-' => {}
                c if c == lower => bits |= x | special,
                c if c == upper => bits |= special,
                _ => return Err(err()),
            }
        }
        Ok(FileMode::new(kind, bits))
    }
}

/// One filesystem object, normalized for sorting and rendering.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Name as stored in the parent directory (`.`/`..` for synthetic entries).
    pub name: String,
    /// Name joined to its parent directory path.
    pub full_path: PathBuf,
    pub mode: FileMode,
    pub size: u64,
    pub modified: SystemTime,
    /// Target of a symlink, when it could be read.
    pub link_target: Option<PathBuf>,
    /// Followed metadata of a symlink target, when it could be stat'ed.
    pub target_mode: Option<FileMode>,
    pub owner_id: u32,
    pub group_id: u32,
    pub nlink: u64,
    /// On-disk usage in 512-byte blocks.
    pub blocks: Option<u64>,
}

impl Entry {
    /// An entry whose metadata could not be read.
    pub fn placeholder(name: impl Into<String>, full_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            full_path: full_path.into(),
            mode: FileMode::new(EntryKind::Unknown, 0),
            size: 0,
            modified: SystemTime::UNIX_EPOCH,
            link_target: None,
            target_mode: None,
            owner_id: 0,
            group_id: 0,
            nlink: 0,
            blocks: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.mode.kind == EntryKind::Unknown
    }

    pub fn is_dir(&self) -> bool {
        self.mode.is_dir()
    }

    /// True for the synthetic `.` and `..` entries.
    pub fn is_dot_entry(&self) -> bool {
        self.name == "." || self.name == ".."
    }
}

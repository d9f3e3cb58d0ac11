//! Error taxonomy for listing operations

use std::io;
use std::path::{Path, PathBuf};

/// Errors that abort a listing run.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("cannot access '{}': No such file or directory", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot access '{}': Permission denied", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing output: {0}")]
    Output(#[source] io::Error),
}

impl ListError {
    /// Classify an I/O error raised while touching `path`.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => ListError::NotFound { path },
            io::ErrorKind::PermissionDenied => ListError::PermissionDenied { path },
            _ => ListError::Io { path, source },
        }
    }

    /// The path the error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ListError::NotFound { path }
            | ListError::PermissionDenied { path }
            | ListError::Io { path, .. } => Some(path),
            ListError::Output(_) => None,
        }
    }
}

impl From<io::Error> for ListError {
    fn from(err: io::Error) -> Self {
        ListError::Output(err)
    }
}

pub type Result<T> = std::result::Result<T, ListError>;

//! Error taxonomy for tree construction and rendering.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}: path not found", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: permission denied", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: I/O error", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse document")]
    Parse(#[from] serde_yaml::Error),

    #[error("path segments cannot be empty")]
    InvalidPath,

    #[error("failed to write tree")]
    Render(#[source] io::Error),
}

impl Error {
    /// Classify an I/O failure on `path` into the filesystem error family.
    pub fn from_io(path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => Error::NotFound { path, source },
            io::ErrorKind::PermissionDenied => Error::PermissionDenied { path, source },
            _ => Error::Io { path, source },
        }
    }

    /// Convert a walkdir failure, keeping the offending path when walkdir knows it.
    pub(crate) fn from_walk(root: &Path, err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());
        Error::from_io(path, io::Error::from(err))
    }

    /// Whether this is one of the filesystem errors (not found, permission, mid-walk I/O).
    pub fn is_filesystem(&self) -> bool {
        matches!(
            self,
            Error::NotFound { .. } | Error::PermissionDenied { .. } | Error::Io { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

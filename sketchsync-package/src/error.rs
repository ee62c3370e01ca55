//! Error types for sketchsync-package.

use std::path::PathBuf;

use thiserror::Error;

use sketchsync_core::WalkError;

#[derive(Debug, Error)]
pub enum PackageError {
    /// The source tree does not exist or is not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The zip encoder failed while writing `path`.
    #[error("zip error at {path}: {source}")]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("walk error: {0}")]
    Walk(WalkError),
}

impl From<WalkError> for PackageError {
    fn from(err: WalkError) -> Self {
        match err {
            WalkError::NotADirectory { path } => PackageError::DirectoryNotFound { path },
            WalkError::Io { path, source } => PackageError::Io { path, source },
            other => PackageError::Walk(other),
        }
    }
}

/// Convenience constructor for [`PackageError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PackageError {
    PackageError::Io {
        path: path.into(),
        source,
    }
}

pub(crate) fn zip_err(path: impl Into<PathBuf>, source: zip::result::ZipError) -> PackageError {
    PackageError::Zip {
        path: path.into(),
        source,
    }
}

//! Error types for sketchsync-compare.

use std::path::PathBuf;

use thiserror::Error;

use sketchsync_core::WalkError;

/// All errors that can arise from comparing trees and driving diffs.
#[derive(Debug, Error)]
pub enum CompareError {
    /// The source root is missing or unreadable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// None of the configured diff tools is installed.
    #[error("no diff tool found (searched: {})", display_paths(.searched))]
    ToolNotFound { searched: Vec<PathBuf> },

    #[error("walk error: {0}")]
    Walk(WalkError),
}

impl From<WalkError> for CompareError {
    fn from(err: WalkError) -> Self {
        match err {
            WalkError::NotADirectory { path } => CompareError::DirectoryNotFound { path },
            WalkError::Io { path, source } => CompareError::Io { path, source },
            other => CompareError::Walk(other),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing configured".to_owned();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience constructor for [`CompareError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CompareError {
    CompareError::Io {
        path: path.into(),
        source,
    }
}

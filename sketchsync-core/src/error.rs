//! Error types for sketchsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// An explicitly requested config file does not exist.
    #[error("config not found at {path}")]
    NotFound { path: PathBuf },

    /// A `~/` path was configured but `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory to expand '~'")]
    HomeNotFound,
}

/// Errors from walking a directory tree.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The walk root is missing or is not a directory.
    #[error("directory not found: {path}")]
    NotADirectory { path: PathBuf },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File names must be UTF-8 to become archive entry names and report lines.
    #[error("non UTF-8 file name at {path}")]
    NonUtf8 { path: PathBuf },
}

pub(crate) fn walk_io_err(path: impl Into<PathBuf>, source: std::io::Error) -> WalkError {
    WalkError::Io {
        path: path.into(),
        source,
    }
}

pub(crate) fn config_io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}

//! sketchsync core library — domain types, configuration, tree walking, errors.
//!
//! - [`types`] — relative paths, suffix filters, comparison statuses
//! - [`error`] — [`ConfigError`], [`WalkError`]
//! - [`config`] — YAML configuration load / save
//! - [`walk`] — deterministic recursive file listing

pub mod config;
pub mod error;
pub mod types;
pub mod walk;

pub use config::{Config, PackageTarget, TreePair};
pub use error::{ConfigError, WalkError};
pub use types::{
    CompareMode, ComparisonStatus, FileComparison, RelPath, SketchGroup, SuffixFilter,
};
pub use walk::{walk_files, walk_files_matching};

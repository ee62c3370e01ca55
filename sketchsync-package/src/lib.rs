//! # sketchsync-package
//!
//! One zip archive per sketch folder.
//!
//! [`write_archive`] stores a single folder; [`package_all`] discovers every
//! sketch under a source tree and writes `<category>/<sketch>.<ext>` into a
//! mirrored target tree.

pub mod archive;
pub mod error;
pub mod orchestrator;

pub use archive::{write_archive, ArchiveSummary};
pub use error::PackageError;
pub use orchestrator::{archive_path_for, discover_groups, package_all, package_all_with};

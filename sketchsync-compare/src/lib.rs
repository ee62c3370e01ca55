//! # sketchsync-compare
//!
//! Tree comparison against a published mirror, plus the report driver.
//!
//! Call [`compare`] to classify every matching file as missing, modified, or
//! unchanged, then hand the results to a [`ReportDriver`] to print them (and
//! optionally open a visual diff on the first modification).

pub mod error;
pub mod report;
pub mod tool;
pub mod tree;
pub mod unified;

pub use error::CompareError;
pub use report::{format_line, report, status_label, ReportDriver, ReportMode, RunOutcome};
pub use tool::DiffTool;
pub use tree::{compare, summarize, CompareSummary};
pub use unified::unified_diff;

//! Status report and the interactive diff escape hatch.
//!
//! The default [`ReportMode::All`] prints one line per comparison and never
//! stops early. [`ReportMode::HaltOnFirstModified`] is a manual triage aid:
//! it opens a visual diff on the first modified file and ends the run.

use std::io::Write;
use std::path::{Path, PathBuf};

use sketchsync_core::{ComparisonStatus, FileComparison, RelPath};

use crate::error::{io_err, CompareError};
use crate::tool::DiffTool;

/// Column width the status label is padded to.
pub const LABEL_WIDTH: usize = 9;

pub fn status_label(status: ComparisonStatus) -> &'static str {
    match status {
        ComparisonStatus::Missing => "missing",
        ComparisonStatus::Modified => "modified",
        ComparisonStatus::Unchanged => "",
    }
}

/// `"modified  Arrays/Array.pde"`: label padded to [`LABEL_WIDTH`], a space,
/// then the relative path.
pub fn format_line(comparison: &FileComparison) -> String {
    format!(
        "{:<width$} {}",
        status_label(comparison.status),
        comparison.path,
        width = LABEL_WIDTH
    )
}

/// Write every result, in order.
pub fn report(results: &[FileComparison], out: &mut impl Write) -> Result<(), CompareError> {
    for result in results {
        writeln!(out, "{}", format_line(result)).map_err(output_err)?;
    }
    Ok(())
}

fn output_err(err: std::io::Error) -> CompareError {
    io_err("<report output>", err)
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportMode {
    /// Report every file.
    #[default]
    All,
    /// Open the diff tool on the first modified file, then stop.
    HaltOnFirstModified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// The run stopped at `path` after the diff tool exited.
    Halted {
        path: RelPath,
        exit_code: Option<i32>,
    },
}

#[derive(Debug, Clone)]
pub struct ReportDriver {
    mode: ReportMode,
    candidates: Vec<PathBuf>,
}

impl ReportDriver {
    /// `candidates` are only looked at once a diff is needed.
    pub fn new(mode: ReportMode, candidates: Vec<PathBuf>) -> Self {
        Self { mode, candidates }
    }

    pub fn run(
        &self,
        results: &[FileComparison],
        source_root: &Path,
        target_root: &Path,
        out: &mut impl Write,
    ) -> Result<RunOutcome, CompareError> {
        self.run_with(results, source_root, target_root, out, format_line)
    }

    /// Like [`run`](Self::run) with a caller-supplied line format.
    pub fn run_with(
        &self,
        results: &[FileComparison],
        source_root: &Path,
        target_root: &Path,
        out: &mut impl Write,
        format: impl Fn(&FileComparison) -> String,
    ) -> Result<RunOutcome, CompareError> {
        for result in results {
            if self.mode == ReportMode::HaltOnFirstModified
                && result.status == ComparisonStatus::Modified
            {
                return self.diff_and_halt(result, source_root, target_root, out);
            }
            writeln!(out, "{}", format(result)).map_err(output_err)?;
        }
        Ok(RunOutcome::Completed)
    }

    fn diff_and_halt(
        &self,
        result: &FileComparison,
        source_root: &Path,
        target_root: &Path,
        out: &mut impl Write,
    ) -> Result<RunOutcome, CompareError> {
        let tool = DiffTool::resolve(&self.candidates)?;
        let tool_output = tool.run(
            &result.path.under(source_root),
            &result.path.under(target_root),
        )?;
        for line in &tool_output.lines {
            writeln!(out, "{line}").map_err(output_err)?;
        }
        tracing::info!("stopped at first modified file: {}", result.path);
        Ok(RunOutcome::Halted {
            path: result.path.clone(),
            exit_code: tool_output.exit_code,
        })
    }
}

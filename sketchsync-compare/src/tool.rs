//! External visual diff tool.
//!
//! Candidates are tried in order and the first one present on disk wins.
//! Resolution happens only when a diff is actually requested.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{io_err, CompareError};

/// A diff tool found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffTool {
    path: PathBuf,
}

/// What a finished tool run left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Non-empty stdout lines, trimmed.
    pub lines: Vec<String>,
}

impl DiffTool {
    /// Pick the first existing candidate.
    pub fn resolve(candidates: &[PathBuf]) -> Result<Self, CompareError> {
        candidates
            .iter()
            .find(|candidate| candidate.exists())
            .map(|path| Self { path: path.clone() })
            .ok_or_else(|| CompareError::ToolNotFound {
                searched: candidates.to_vec(),
            })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run the tool on `left` and `right`, blocking until it exits.
    ///
    /// Stdout is captured in full; stderr is inherited so the tool can still
    /// report its own problems.
    pub fn run(&self, left: &Path, right: &Path) -> Result<ToolOutput, CompareError> {
        tracing::info!(
            "opening {} {} {}",
            self.path.display(),
            left.display(),
            right.display()
        );
        let output = Command::new(&self.path)
            .arg(left)
            .arg(right)
            .stderr(std::process::Stdio::inherit())
            .output()
            .map_err(|e| io_err(&self.path, e))?;

        let lines = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();
        let exit_code = output.status.code();
        if !output.status.success() {
            tracing::warn!("{} exited with {}", self.path.display(), output.status);
        }
        Ok(ToolOutput { exit_code, lines })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolve_picks_first_existing_candidate() {
        let tmp = TempDir::new().unwrap();
        let second = tmp.path().join("opendiff");
        let third = tmp.path().join("meld");
        std::fs::write(&second, b"").unwrap();
        std::fs::write(&third, b"").unwrap();

        let tool = DiffTool::resolve(&[tmp.path().join("ksdiff"), second.clone(), third]).unwrap();
        assert_eq!(tool.path(), second);
    }

    #[test]
    fn resolve_reports_every_searched_path() {
        let tmp = TempDir::new().unwrap();
        let candidates = vec![tmp.path().join("ksdiff"), tmp.path().join("opendiff")];
        let err = DiffTool::resolve(&candidates).unwrap_err();
        match &err {
            CompareError::ToolNotFound { searched } => assert_eq!(searched, &candidates),
            other => panic!("expected ToolNotFound, got {other:?}"),
        }
        assert!(err.to_string().contains("opendiff"));
    }

    #[test]
    fn resolve_with_no_candidates_is_tool_not_found() {
        let err = DiffTool::resolve(&[]).unwrap_err();
        assert!(matches!(err, CompareError::ToolNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn run_waits_and_captures_stdout() {
        let tool = DiffTool::resolve(&[PathBuf::from("/bin/echo")]).unwrap();
        let output = tool
            .run(Path::new("left.pde"), Path::new("right.pde"))
            .unwrap();
        assert_eq!(output.exit_code, Some(0));
        assert_eq!(output.lines, ["left.pde right.pde"]);
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_not_an_error() {
        let tool = DiffTool::resolve(&[PathBuf::from("/bin/false")]).unwrap();
        let output = tool.run(Path::new("a"), Path::new("b")).unwrap();
        assert_eq!(output.exit_code, Some(1));
        assert!(output.lines.is_empty());
    }
}

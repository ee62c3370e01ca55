//! Unified text diff for `compare --unified`.

use std::path::Path;

use similar::TextDiff;

use sketchsync_core::RelPath;

use crate::error::{io_err, CompareError};

/// Render a unified diff of `source` against `target`, headed `a/<rel>` and
/// `b/<rel>`. Returns an empty string when the normalised texts are equal.
pub fn unified_diff(source: &Path, target: &Path, rel: &RelPath) -> Result<String, CompareError> {
    let old = read_normalized(source)?;
    let new = read_normalized(target)?;
    if old == new {
        return Ok(String::new());
    }

    let old_header = format!("a/{rel}");
    let new_header = format!("b/{rel}");
    Ok(TextDiff::from_lines(&old, &new)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string())
}

fn read_normalized(path: &Path) -> Result<String, CompareError> {
    let bytes = std::fs::read(path).map_err(|e| io_err(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).replace("\r\n", "\n"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn edit_produces_headers_and_hunk() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.pde");
        let b = tmp.path().join("b.pde");
        fs::write(&a, "void setup() {\n  size(100, 100);\n}\n").unwrap();
        fs::write(&b, "void setup() {\n  size(200, 200);\n}\n").unwrap();

        let diff = unified_diff(&a, &b, &RelPath::from_slash("Arrays/Array.pde")).unwrap();
        assert!(diff.contains("--- a/Arrays/Array.pde"));
        assert!(diff.contains("+++ b/Arrays/Array.pde"));
        assert!(diff.contains("@@"));
        assert!(diff.contains("-  size(100, 100);"));
        assert!(diff.contains("+  size(200, 200);"));
    }

    #[test]
    fn line_ending_only_change_is_empty() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.pde");
        let b = tmp.path().join("b.pde");
        fs::write(&a, "line one\r\nline two\r\n").unwrap();
        fs::write(&b, "line one\nline two\n").unwrap();

        let diff = unified_diff(&a, &b, &RelPath::from_slash("a.pde")).unwrap();
        assert!(diff.is_empty());
    }
}

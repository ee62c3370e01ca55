//! Tree comparator.
//!
//! Every file under the source root that matches the suffix filter is looked
//! up at the same relative path under the target root:
//!
//! 1. target absent → `Missing`
//! 2. target not a regular file → `Modified`
//! 3. shallow mode, same size and mtime → `Unchanged` (content not read)
//! 4. size differs → `Modified`
//! 5. content compared chunk by chunk → `Unchanged` / `Modified`
//!
//! Results follow the sorted walk order of the source tree.

use std::fmt;
use std::fs::{self, File, Metadata};
use std::io::{ErrorKind, Read};
use std::path::Path;

use serde::Serialize;

use sketchsync_core::{
    walk_files_matching, CompareMode, ComparisonStatus, FileComparison, SuffixFilter,
};

use crate::error::{io_err, CompareError};

const CHUNK: usize = 8 * 1024;

/// Compare every matching file under `source_root` with its counterpart under
/// `target_root`.
///
/// A missing `target_root` is not an error; every file reports `Missing`.
pub fn compare(
    source_root: &Path,
    target_root: &Path,
    filter: &SuffixFilter,
    mode: CompareMode,
) -> Result<Vec<FileComparison>, CompareError> {
    let files = walk_files_matching(source_root, filter)?;
    tracing::debug!(
        "comparing {} files under {} ({mode})",
        files.len(),
        source_root.display()
    );

    let mut results = Vec::with_capacity(files.len());
    for rel in files {
        let source = rel.under(source_root);
        let target = rel.under(target_root);
        let status = compare_file(&source, &target, mode)?;
        tracing::debug!("{status}: {rel}");
        results.push(FileComparison { path: rel, status });
    }

    tracing::info!(
        "{} -> {}: {}",
        source_root.display(),
        target_root.display(),
        summarize(&results)
    );
    Ok(results)
}

/// Classify a single file pair.
pub fn compare_file(
    source: &Path,
    target: &Path,
    mode: CompareMode,
) -> Result<ComparisonStatus, CompareError> {
    let target_meta = match fs::metadata(target) {
        Ok(meta) => meta,
        Err(err) if err.kind() == ErrorKind::PermissionDenied => return Err(io_err(target, err)),
        Err(_) => return Ok(ComparisonStatus::Missing),
    };
    if !target_meta.is_file() {
        return Ok(ComparisonStatus::Modified);
    }
    let source_meta = fs::metadata(source).map_err(|e| io_err(source, e))?;

    if mode == CompareMode::Shallow && same_signature(&source_meta, &target_meta) {
        return Ok(ComparisonStatus::Unchanged);
    }
    if source_meta.len() != target_meta.len() {
        return Ok(ComparisonStatus::Modified);
    }

    if contents_equal(source, target)? {
        Ok(ComparisonStatus::Unchanged)
    } else {
        Ok(ComparisonStatus::Modified)
    }
}

fn same_signature(a: &Metadata, b: &Metadata) -> bool {
    if a.len() != b.len() {
        return false;
    }
    match (a.modified(), b.modified()) {
        (Ok(ma), Ok(mb)) => ma == mb,
        _ => false,
    }
}

fn contents_equal(a: &Path, b: &Path) -> Result<bool, CompareError> {
    let mut fa = File::open(a).map_err(|e| io_err(a, e))?;
    let mut fb = File::open(b).map_err(|e| io_err(b, e))?;
    let mut buf_a = vec![0u8; CHUNK];
    let mut buf_b = vec![0u8; CHUNK];

    loop {
        let na = read_chunk(&mut fa, &mut buf_a).map_err(|e| io_err(a, e))?;
        let nb = read_chunk(&mut fb, &mut buf_b).map_err(|e| io_err(b, e))?;
        if na != nb || buf_a[..na] != buf_b[..nb] {
            return Ok(false);
        }
        if na == 0 {
            return Ok(true);
        }
    }
}

/// Fill `buf` unless EOF comes first; a plain `read` may return short.
fn read_chunk(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompareSummary {
    pub missing: usize,
    pub modified: usize,
    pub unchanged: usize,
}

impl fmt::Display for CompareSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} missing, {} modified, {} unchanged",
            self.missing, self.modified, self.unchanged
        )
    }
}

pub fn summarize(results: &[FileComparison]) -> CompareSummary {
    let mut summary = CompareSummary::default();
    for result in results {
        match result.status {
            ComparisonStatus::Missing => summary.missing += 1,
            ComparisonStatus::Modified => summary.modified += 1,
            ComparisonStatus::Unchanged => summary.unchanged += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn directory_in_place_of_file_is_modified() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        write(src.path(), "Arrays/Array.pde", b"A");
        fs::create_dir_all(dst.path().join("Arrays/Array.pde")).unwrap();

        let status = compare_file(
            &src.path().join("Arrays/Array.pde"),
            &dst.path().join("Arrays/Array.pde"),
            CompareMode::Full,
        )
        .unwrap();
        assert_eq!(status, ComparisonStatus::Modified);
    }

    #[test]
    fn content_spanning_several_chunks_is_compared_fully() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let mut body = vec![b'x'; CHUNK * 3 + 17];
        write(src.path(), "big.pde", &body);
        *body.last_mut().unwrap() = b'y';
        write(dst.path(), "big.pde", &body);

        assert!(!contents_equal(&src.path().join("big.pde"), &dst.path().join("big.pde")).unwrap());
        assert!(contents_equal(&src.path().join("big.pde"), &src.path().join("big.pde")).unwrap());
    }

    #[test]
    fn empty_files_are_equal() {
        let src = TempDir::new().unwrap();
        write(src.path(), "a.pde", b"");
        write(src.path(), "b.pde", b"");
        assert!(contents_equal(&src.path().join("a.pde"), &src.path().join("b.pde")).unwrap());
    }

    #[test]
    fn summary_counts_each_status() {
        use sketchsync_core::RelPath;
        let results = [
            ComparisonStatus::Missing,
            ComparisonStatus::Modified,
            ComparisonStatus::Modified,
            ComparisonStatus::Unchanged,
        ]
        .into_iter()
        .map(|status| FileComparison {
            path: RelPath::from_slash("x.pde"),
            status,
        })
        .collect::<Vec<_>>();

        let summary = summarize(&results);
        assert_eq!(
            summary,
            CompareSummary {
                missing: 1,
                modified: 2,
                unchanged: 1
            }
        );
        assert_eq!(summary.to_string(), "1 missing, 2 modified, 1 unchanged");
    }
}

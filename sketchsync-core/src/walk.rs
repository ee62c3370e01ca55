//! Deterministic recursive file listing.
//!
//! Directory entries are sorted by file name at every level, so callers get a
//! stable depth-first order regardless of what `read_dir` returns.
//! Symlinked directories are not descended into.

use std::fs;
use std::path::Path;

use crate::error::{walk_io_err, WalkError};
use crate::types::{RelPath, SuffixFilter};

/// Every regular file under `root`, relative to `root`.
pub fn walk_files(root: &Path) -> Result<Vec<RelPath>, WalkError> {
    walk_with(root, |_| true)
}

/// Files under `root` whose name matches `filter`, relative to `root`.
pub fn walk_files_matching(root: &Path, filter: &SuffixFilter) -> Result<Vec<RelPath>, WalkError> {
    walk_with(root, |name| filter.matches(name))
}

fn walk_with(root: &Path, keep: impl Fn(&str) -> bool) -> Result<Vec<RelPath>, WalkError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        _ => {
            return Err(WalkError::NotADirectory {
                path: root.to_path_buf(),
            })
        }
    }

    // An unreadable root counts as a missing one.
    let entries = fs::read_dir(root).map_err(|_| WalkError::NotADirectory {
        path: root.to_path_buf(),
    })?;
    let mut out = Vec::new();
    walk_entries(root, entries, &RelPath::root(), &keep, &mut out)?;
    Ok(out)
}

fn walk_dir(
    dir: &Path,
    rel: &RelPath,
    keep: &impl Fn(&str) -> bool,
    out: &mut Vec<RelPath>,
) -> Result<(), WalkError> {
    let entries = fs::read_dir(dir).map_err(|e| walk_io_err(dir, e))?;
    walk_entries(dir, entries, rel, keep, out)
}

fn walk_entries(
    dir: &Path,
    entries: fs::ReadDir,
    rel: &RelPath,
    keep: &impl Fn(&str) -> bool,
    out: &mut Vec<RelPath>,
) -> Result<(), WalkError> {
    let mut entries = entries
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| walk_io_err(dir, e))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let name = entry
            .file_name()
            .into_string()
            .map_err(|_| WalkError::NonUtf8 { path: path.clone() })?;
        let file_type = entry.file_type().map_err(|e| walk_io_err(&path, e))?;

        if file_type.is_dir() {
            walk_dir(&path, &rel.join(name), keep, out)?;
        } else if file_type.is_file() {
            if keep(&name) {
                out.push(rel.join(name));
            }
        } else if file_type.is_symlink() {
            // Links to files are listed; links to directories are not followed.
            let is_file = fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false);
            if is_file && keep(&name) {
                out.push(rel.join(name));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn lists_files_sorted_depth_first() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "b/z.pde");
        touch(tmp.path(), "a/y.pde");
        touch(tmp.path(), "a/sub/x.pde");
        touch(tmp.path(), "top.txt");

        let names: Vec<String> = walk_files(tmp.path())
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, ["a/sub/x.pde", "a/y.pde", "b/z.pde", "top.txt"]);
    }

    #[test]
    fn filter_applies_to_file_names_only() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "sketch.pde/data.txt");
        touch(tmp.path(), "Arrays/Array.pde");
        touch(tmp.path(), "Arrays/data/image.png");

        let names: Vec<String> = walk_files_matching(tmp.path(), &SuffixFilter::default())
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, ["Arrays/Array.pde"]);
    }

    #[test]
    fn empty_directories_yield_nothing() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a/b/c")).unwrap();
        assert!(walk_files(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_not_a_directory() {
        let tmp = TempDir::new().unwrap();
        let err = walk_files(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, WalkError::NotADirectory { .. }), "got: {err}");
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_root_is_not_a_directory() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("locked");
        touch(tmp.path(), "locked/Array.pde");
        fs::set_permissions(&root, fs::Permissions::from_mode(0o000)).unwrap();
        let privileged = fs::read_dir(&root).is_ok();

        let result = walk_files(&root);
        fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();
        if privileged {
            // Permission bits do not apply to this user.
            return;
        }
        let err = result.unwrap_err();
        assert!(matches!(err, WalkError::NotADirectory { .. }), "got: {err}");
    }

    #[test]
    fn file_root_is_not_a_directory() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "file.pde");
        let err = walk_files(&tmp.path().join("file.pde")).unwrap_err();
        assert!(matches!(err, WalkError::NotADirectory { .. }), "got: {err}");
    }
}

//! Packaging orchestrator.
//!
//! A sketch is any directory holding at least one file that matches the
//! suffix filter. Sketches are grouped by category (the sketch directory's
//! parent) and archived in sorted order:
//!
//! ```text
//! <source>/Topics/Color/Brightness/Brightness.pde
//!   -> <target>/Topics/Color/Brightness.<ext>
//! ```
//!
//! Each archive is final once written; a later failure does not roll back
//! earlier ones.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use sketchsync_core::{walk_files_matching, SketchGroup, SuffixFilter};

use crate::archive::{write_archive, ArchiveSummary};
use crate::error::{io_err, PackageError};

/// Distinct sketch directories under `source_folder`, sorted.
///
/// Matching files directly in `source_folder` belong to no sketch and are
/// skipped.
pub fn discover_groups(
    source_folder: &Path,
    filter: &SuffixFilter,
) -> Result<Vec<SketchGroup>, PackageError> {
    let mut groups = BTreeSet::new();
    for rel in walk_files_matching(source_folder, filter)? {
        let Some(dir) = rel.parent() else { continue };
        match SketchGroup::from_dir(&dir) {
            Some(group) => {
                groups.insert(group);
            }
            None => tracing::warn!(
                "skipping {rel}: not inside a sketch folder under {}",
                source_folder.display()
            ),
        }
    }
    Ok(groups.into_iter().collect())
}

/// `<target>/<category>/<sketch>.<extension>`
pub fn archive_path_for(target_folder: &Path, group: &SketchGroup, extension: &str) -> PathBuf {
    group
        .category
        .under(target_folder)
        .join(format!("{}.{extension}", group.sketch))
}

/// Archive every sketch under `source_folder` into `target_folder`.
pub fn package_all(
    source_folder: &Path,
    target_folder: &Path,
    filter: &SuffixFilter,
    extension: &str,
) -> Result<Vec<ArchiveSummary>, PackageError> {
    package_all_with(source_folder, target_folder, filter, extension, |_| {})
}

/// Like [`package_all`], calling `on_group` before each archive is written.
pub fn package_all_with(
    source_folder: &Path,
    target_folder: &Path,
    filter: &SuffixFilter,
    extension: &str,
    mut on_group: impl FnMut(&SketchGroup),
) -> Result<Vec<ArchiveSummary>, PackageError> {
    let groups = discover_groups(source_folder, filter)?;
    tracing::debug!(
        "{} sketches under {}",
        groups.len(),
        source_folder.display()
    );

    let mut written = Vec::with_capacity(groups.len());
    for group in groups {
        tracing::info!("packaging {group}");
        on_group(&group);
        let category_dir = group.category.under(target_folder);
        std::fs::create_dir_all(&category_dir).map_err(|e| io_err(&category_dir, e))?;

        let archive = archive_path_for(target_folder, &group, extension);
        let summary = write_archive(&archive, &group.rel_dir().under(source_folder))?;
        written.push(summary);
    }
    Ok(written)
}

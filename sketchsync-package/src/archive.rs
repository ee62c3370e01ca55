//! Archive writer.
//!
//! Entry names are relative to the parent of the source folder, so the
//! archive's internal root is the folder's own name:
//!
//! ```text
//! Topics/Color/Brightness/Brightness.pde  ->  Brightness/Brightness.pde
//! Topics/Color/Brightness/data/ramp.png   ->  Brightness/data/ramp.png
//! ```
//!
//! The output is created or truncated. If a source file fails mid-walk the
//! partial archive stays on disk.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use sketchsync_core::{walk_files, RelPath};

use crate::error::{io_err, zip_err, PackageError};

/// What [`write_archive`] stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    /// Entry names in write order.
    pub entries: Vec<String>,
}

/// Deflate every file under `source_folder` into `archive_path`.
pub fn write_archive(
    archive_path: &Path,
    source_folder: &Path,
) -> Result<ArchiveSummary, PackageError> {
    let root_name = root_name(source_folder)?;
    // Walk before creating the output so a bad source leaves nothing behind.
    let files = walk_files(source_folder)?;

    let file = File::create(archive_path).map_err(|e| io_err(archive_path, e))?;
    // The writer owns the handle; every early return below drops and closes it.
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = Vec::with_capacity(files.len());
    for rel in files {
        let source = rel.under(source_folder);
        let entry = entry_name(&root_name, &rel);
        tracing::debug!("{} <- {}", entry, source.display());

        let mut reader = File::open(&source)
            .map(BufReader::new)
            .map_err(|e| io_err(&source, e))?;
        zip.start_file(entry.as_str(), options)
            .map_err(|e| zip_err(archive_path, e))?;
        io::copy(&mut reader, &mut zip).map_err(|e| io_err(&source, e))?;
        entries.push(entry);
    }

    zip.finish().map_err(|e| zip_err(archive_path, e))?;
    tracing::info!(
        "wrote {} ({} entries)",
        archive_path.display(),
        entries.len()
    );
    Ok(ArchiveSummary {
        path: archive_path.to_path_buf(),
        entries,
    })
}

fn entry_name(root_name: &str, rel: &RelPath) -> String {
    RelPath::from_segments(
        std::iter::once(root_name.to_owned()).chain(rel.segments().iter().cloned()),
    )
    .to_string()
}

/// Last segment of `folder`; resolves `.`-style paths through the filesystem.
fn root_name(folder: &Path) -> Result<String, PackageError> {
    let resolved;
    let name = match folder.file_name() {
        Some(name) => name,
        None => {
            resolved = folder.canonicalize().map_err(|_| PackageError::DirectoryNotFound {
                path: folder.to_path_buf(),
            })?;
            resolved
                .file_name()
                .ok_or_else(|| PackageError::DirectoryNotFound {
                    path: folder.to_path_buf(),
                })?
        }
    };
    name.to_str()
        .map(str::to_owned)
        .ok_or_else(|| PackageError::Walk(sketchsync_core::WalkError::NonUtf8 {
            path: folder.to_path_buf(),
        }))
}

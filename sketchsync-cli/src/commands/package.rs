//! `sketchsync package` — one archive per sketch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

use sketchsync_core::{Config, SuffixFilter};
use sketchsync_package::package_all_with;

/// Arguments for `sketchsync package`.
#[derive(Args, Debug)]
pub struct PackageArgs {
    /// Examples tree to package (omit both paths to use the `package` config).
    #[arg(requires = "target")]
    pub source: Option<PathBuf>,

    /// Directory that receives `<category>/<sketch>.<ext>`.
    pub target: Option<PathBuf>,

    /// A folder is a sketch when it holds a file ending with this suffix.
    #[arg(long)]
    pub suffix: Option<String>,

    /// Archive file extension, without the dot.
    #[arg(long)]
    pub extension: Option<String>,
}

#[derive(Tabled)]
struct ArchiveRow {
    #[tabled(rename = "archive")]
    archive: String,
    #[tabled(rename = "entries")]
    entries: usize,
}

impl PackageArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let (source, target) = match (self.source, self.target) {
            (Some(source), Some(target)) => (source, target),
            _ => {
                let package = config.package.as_ref().context(
                    "nothing to package: pass <src> <dst> or add a `package` section to the config",
                )?;
                (package.source.clone(), package.target.clone())
            }
        };
        let filter = self
            .suffix
            .map(SuffixFilter::new)
            .unwrap_or_else(|| config.suffix.clone());
        let extension = self
            .extension
            .unwrap_or_else(|| config.archive_extension.clone());
        let extension = extension.trim_start_matches('.');

        let written = package_all_with(&source, &target, &filter, extension, |group| {
            println!("Packaging {group}...");
        })
        .with_context(|| {
            format!(
                "packaging failed for '{}' into '{}'",
                source.display(),
                target.display()
            )
        })?;

        if written.is_empty() {
            println!("No sketches found under '{}'.", source.display());
            return Ok(());
        }

        let rows: Vec<ArchiveRow> = written
            .iter()
            .map(|summary| ArchiveRow {
                archive: summary
                    .path
                    .strip_prefix(&target)
                    .unwrap_or(&summary.path)
                    .display()
                    .to_string(),
                entries: summary.entries.len(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        println!("✓ {} archives written to {}", written.len(), target.display());
        Ok(())
    }
}

//! `sketchsync init [<path>] [--force]`

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use sketchsync_core::{config, Config};

/// Write a starter config.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the config.
    #[arg(default_value = config::CONFIG_FILE_NAME)]
    pub path: PathBuf,

    /// Replace an existing file.
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        if self.path.exists() && !self.force {
            bail!(
                "'{}' already exists; pass --force to overwrite",
                self.path.display()
            );
        }

        config::save_at(&self.path, &Config::template())
            .with_context(|| format!("failed to write '{}'", self.path.display()))?;

        println!("✓ Wrote {}", self.path.display());
        println!("  Edit `pairs` and `package` to point at your checkouts.");
        Ok(())
    }
}

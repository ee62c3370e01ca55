//! sketchsync — keep example sketches in step with their published mirror.
//!
//! # Usage
//!
//! ```text
//! sketchsync compare [<src> <dst>] [--suffix .pde] [--full] [--interactive]
//!                    [--diff-tool PATH]... [--unified] [--json]
//! sketchsync package [<src> <dst>] [--suffix .pde] [--extension pdez]
//! sketchsync init [<path>] [--force]
//! ```
//!
//! Without explicit paths, `compare` and `package` read the pairs from
//! `sketchsync.yaml` (or the file given with `--config`).

mod commands;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use commands::{compare::CompareArgs, init::InitArgs, package::PackageArgs};
use sketchsync_core::{config, Config};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "sketchsync",
    version,
    about = "Compare example sketches against a docs mirror and package them as archives",
    long_about = None,
)]
struct Cli {
    /// Config file (default: ./sketchsync.yaml when present).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report missing and modified sketch files in a mirror.
    Compare(CompareArgs),

    /// Write one archive per sketch into a mirrored category tree.
    Package(PackageArgs),

    /// Write a starter sketchsync.yaml.
    Init(InitArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Compare(args) => args.run(&load_config(cli.config.as_deref())?),
        Commands::Package(args) => args.run(&load_config(cli.config.as_deref())?),
        Commands::Init(args) => args.run(),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let config = config::discover(&cwd, explicit).context("failed to load config")?;
    tracing::debug!("config: {config:?}");
    Ok(config)
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

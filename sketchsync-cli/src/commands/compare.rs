//! `sketchsync compare` — report missing and modified sketch files.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use sketchsync_compare::{
    compare, report::LABEL_WIDTH, status_label, summarize, unified_diff, CompareSummary,
    ReportDriver, ReportMode, RunOutcome,
};
use sketchsync_core::{
    CompareMode, ComparisonStatus, Config, FileComparison, SuffixFilter, TreePair,
};

/// Arguments for `sketchsync compare`.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Canonical examples tree (omit both paths to use the configured pairs).
    #[arg(requires = "target")]
    pub source: Option<PathBuf>,

    /// Mirror to compare against.
    pub target: Option<PathBuf>,

    /// Only compare files ending with this suffix.
    #[arg(long)]
    pub suffix: Option<String>,

    /// Always compare content, never trust size + mtime.
    #[arg(long)]
    pub full: bool,

    /// Open a visual diff on the first modified file, then stop.
    #[arg(long, short = 'i')]
    pub interactive: bool,

    /// Diff tool to try (repeatable, first existing wins).
    #[arg(long = "diff-tool", value_name = "PATH")]
    pub diff_tools: Vec<PathBuf>,

    /// Print a unified diff for each modified text file.
    #[arg(long, conflicts_with = "json")]
    pub unified: bool,

    /// Emit machine-readable JSON.
    #[arg(long, conflicts_with = "interactive")]
    pub json: bool,
}

#[derive(Serialize)]
struct CompareReportJson {
    generated_at: DateTime<Utc>,
    pairs: Vec<PairReportJson>,
}

#[derive(Serialize)]
struct PairReportJson {
    source: String,
    target: String,
    summary: CompareSummary,
    files: Vec<FileComparison>,
}

impl CompareArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let explicit = self.source.is_some();
        let pairs = match (&self.source, &self.target) {
            (Some(source), Some(target)) => vec![TreePair {
                source: source.clone(),
                target: target.clone(),
            }],
            _ => config.pairs.clone(),
        };
        if pairs.is_empty() {
            println!("No pairs configured. Pass <src> <dst> or run `sketchsync init`.");
            return Ok(());
        }

        let filter = self
            .suffix
            .clone()
            .map(SuffixFilter::new)
            .unwrap_or_else(|| config.suffix.clone());
        let mode = if self.full {
            CompareMode::Full
        } else {
            config.compare_mode
        };

        if self.json {
            return print_json(&pairs, &filter, mode);
        }

        let candidates = if self.diff_tools.is_empty() {
            config.diff_tools.clone()
        } else {
            self.diff_tools.clone()
        };
        let report_mode = if self.interactive {
            ReportMode::HaltOnFirstModified
        } else {
            ReportMode::All
        };
        let driver = ReportDriver::new(report_mode, candidates);

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for pair in &pairs {
            if !explicit {
                writeln!(
                    out,
                    "{}",
                    format!("== {} -> {}", pair.source.display(), pair.target.display()).bold()
                )?;
            }

            let results = compare_pair(pair, &filter, mode)?;
            let outcome = driver
                .run_with(&results, &pair.source, &pair.target, &mut out, paint_line)
                .with_context(|| format!("report failed for '{}'", pair.source.display()))?;
            if let RunOutcome::Halted { path, .. } = outcome {
                writeln!(out, "Stopped at {path}.")?;
                return Ok(());
            }

            writeln!(out, "{}", summarize(&results))?;
            if self.unified {
                print_unified(&mut out, &results, &pair.source, &pair.target)?;
            }
        }
        Ok(())
    }
}

fn compare_pair(
    pair: &TreePair,
    filter: &SuffixFilter,
    mode: CompareMode,
) -> Result<Vec<FileComparison>> {
    compare(&pair.source, &pair.target, filter, mode).with_context(|| {
        format!(
            "compare failed for '{}' against '{}'",
            pair.source.display(),
            pair.target.display()
        )
    })
}

fn paint_line(comparison: &FileComparison) -> String {
    let label = format!(
        "{:<width$}",
        status_label(comparison.status),
        width = LABEL_WIDTH
    );
    let label = match comparison.status {
        ComparisonStatus::Missing => label.red().to_string(),
        ComparisonStatus::Modified => label.yellow().to_string(),
        ComparisonStatus::Unchanged => label,
    };
    format!("{label} {}", comparison.path)
}

fn print_unified(
    out: &mut impl Write,
    results: &[FileComparison],
    source_root: &Path,
    target_root: &Path,
) -> Result<()> {
    for result in results
        .iter()
        .filter(|r| r.status == ComparisonStatus::Modified)
    {
        let diff = unified_diff(
            &result.path.under(source_root),
            &result.path.under(target_root),
            &result.path,
        )
        .with_context(|| format!("diff failed for '{}'", result.path))?;
        if diff.is_empty() {
            continue;
        }
        write!(out, "{diff}")?;
        if !diff.ends_with('\n') {
            writeln!(out)?;
        }
    }
    Ok(())
}

fn print_json(pairs: &[TreePair], filter: &SuffixFilter, mode: CompareMode) -> Result<()> {
    let mut reports = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let files = compare_pair(pair, filter, mode)?;
        reports.push(PairReportJson {
            source: pair.source.display().to_string(),
            target: pair.target.display().to_string(),
            summary: summarize(&files),
            files,
        });
    }
    let payload = CompareReportJson {
        generated_at: Utc::now(),
        pairs: reports,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize compare JSON")?
    );
    Ok(())
}

//! `mods-migrate` — batch-normalize MODS records for the new ingest platform.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]) and apply CLI overrides.
//! 3. Collect MODS text per object ([`source::DirectorySource`]).
//! 4. Extract each record, one at a time ([`Extractor::extract`]).
//! 5. Render the requested report ([`report`]).
//! 6. Exit `0`, or `1` if any record failed to extract.

mod cli;

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, ReportFormat};
use mods_migrate::config::load_config;
use mods_migrate::models::{RecordReport, RecordStatus};
use mods_migrate::report;
use mods_migrate::source::{self, ModsSource, SourceRecord};
use mods_migrate::Extractor;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let workdir = std::env::current_dir()?;
    let mut config = load_config(&workdir, cli.config.as_deref())?;
    if let Some(policy) = &cli.unknown_month {
        config.dates.unknown_month = policy.into();
    }
    if cli.allow_missing_title {
        config.titles.required = false;
    }
    let extractor = Extractor::new(config.extract_options());

    let mut records = Vec::new();
    for path in &cli.paths {
        records.extend(source::DirectorySource::new(path).records()?);
    }

    if records.is_empty() {
        eprintln!("No MODS records found");
        std::process::exit(1);
    }

    let pb = if !cli.quiet {
        let pb = ProgressBar::new(records.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut reports = Vec::with_capacity(records.len());
    for record in records {
        reports.push(process(&extractor, record));
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    match cli.report {
        ReportFormat::Terminal => report::terminal::render(&reports, cli.verbose, cli.quiet)?,
        ReportFormat::Json => report::json::render(&reports, &mut std::io::stdout().lock())?,
    }

    let failed = reports
        .iter()
        .any(|r| matches!(r.status, RecordStatus::Failed { .. }));
    if failed {
        std::process::exit(1);
    }

    Ok(())
}

fn process(extractor: &Extractor, record: SourceRecord) -> RecordReport {
    let status = match record.mods {
        None => {
            debug!(pid = %record.pid, "skipping stub MODS datastream");
            RecordStatus::Skipped
        }
        Some(mods) => match extractor.extract(&mods) {
            Ok(extraction) => {
                for diagnostic in &extraction.diagnostics {
                    debug!(pid = %record.pid, %diagnostic, "needs review");
                }
                RecordStatus::Extracted {
                    fields: extraction.record,
                    diagnostics: extraction.diagnostics,
                }
            }
            Err(e) => {
                warn!(pid = %record.pid, error = %e, "extraction failed");
                RecordStatus::Failed {
                    error: e.to_string(),
                }
            }
        },
    };

    RecordReport {
        pid: record.pid,
        status,
    }
}

/// Log to stderr; `RUST_LOG` wins over the verbosity flags.
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "mods_migrate=debug"
    } else if quiet {
        "mods_migrate=error"
    } else {
        "mods_migrate=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

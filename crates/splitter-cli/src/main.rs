//! Handler splitter CLI
//!
//! Extracts inline handlers from monolithic source documents into one file
//! per handler.

mod cli;
mod error;
mod logging;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;

use splitter_blocks::{EncodingKind, Termination};
use splitter_core::{
    DocumentConfig, DocumentReport, Emitted, EmittedFile, ExtractionSession, SessionEvent,
    SplitterConfig,
};
use splitter_fs::{ConfigStore, DiskSink, NormalizedPath};

use cli::Cli;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config = build_config(&cli)?;

    if let Some(path) = &cli.dump_config {
        ConfigStore::new().save(&NormalizedPath::new(path), &config)?;
        println!("{} Wrote configuration to {}", "OK".green().bold(), path.display());
        return Ok(());
    }

    let session = ExtractionSession::from_config(&config, Arc::new(DiskSink::new()), cli.dry_run)?;
    let documents = ExtractionSession::load(&config)?;
    let report = session.run_with(&documents, |event| match event {
        SessionEvent::File(file) => print_file(file, cli.dry_run),
        SessionEvent::DocumentDone(document) => print_document(document, cli.dry_run),
    })?;

    println!(
        "{} Total tools {}: {}",
        "OK".green().bold(),
        if cli.dry_run { "to extract" } else { "extracted" },
        report.total()
    );
    Ok(())
}

/// Effective configuration: config file (or defaults) with flags applied.
fn build_config(cli: &Cli) -> Result<SplitterConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let loaded: SplitterConfig = ConfigStore::new().load(&NormalizedPath::new(path))?;
            match path.parent().filter(|p| !p.as_os_str().is_empty()) {
                Some(base) => loaded.rebase(base),
                None => loaded,
            }
        }
        None => SplitterConfig::default(),
    };

    apply_overrides(&mut config, cli)?;
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut SplitterConfig, cli: &Cli) -> Result<()> {
    if let Some(primary) = &cli.primary {
        let first = config
            .documents
            .first_mut()
            .ok_or_else(|| CliError::user("--primary given but no documents are configured"))?;
        first.path = primary.clone();
    }

    if !cli.secondaries.is_empty() {
        config.documents.truncate(1);
        config
            .documents
            .extend(cli.secondaries.iter().map(|path| {
                DocumentConfig::new(document_label(path), path.clone(), EncodingKind::TableEntry)
            }));
    }

    if let Some(out) = &cli.out {
        config.output_root = out.clone();
    }
    if let Some(prefix) = &cli.prefix {
        config.prefix = prefix.clone();
    }
    if cli.legacy_nesting {
        config.termination = Termination::SingleNesting;
    }
    Ok(())
}

fn document_label(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

fn verb(dry_run: bool) -> &'static str {
    if dry_run { "Would extract" } else { "Extracted" }
}

fn print_file(file: &EmittedFile, dry_run: bool) {
    if file.outcome == Emitted::Written {
        println!("{} {} to {}", verb(dry_run), file.name.cyan(), file.path);
    }
}

fn print_document(document: &DocumentReport, dry_run: bool) {
    println!();
    println!(
        "{} {} {} tools from {}",
        "=>".blue().bold(),
        verb(dry_run),
        document.extracted,
        document.label
    );
    if document.skipped > 0 {
        println!(
            "   {} {} already present, skipped",
            "-".yellow(),
            document.skipped
        );
    }
}

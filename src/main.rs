//! frameprint - assemble animated images and fingerprint their pixels.
//!
//! This binary parses the command line, sets up logging and dispatches to the
//! `hash`, `export` and `formats` commands.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use frameprint::{
    batch::{any_failed, hash_files, load, FileOutcome, HashOptions},
    config::{Cli, Command, ExportConfig, FormatsConfig, HashConfig, OutputFormat},
    format::FormatRegistry,
    io::{export_frames, ImageLoader},
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Hash(config) => run_hash(config).await,
        Command::Export(config) => run_export(config),
        Command::Formats(config) => run_formats(config),
    }
}

fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "frameprint=debug"
    } else {
        "frameprint=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// =============================================================================
// Hash Command
// =============================================================================

async fn run_hash(config: HashConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let options = HashOptions {
        mime: config.mime.clone(),
        per_frame: config.per_frame,
        jobs: config.jobs,
    };
    let outcomes = hash_files(Arc::new(ImageLoader::new()), &config.files, options).await;

    for outcome in &outcomes {
        if let FileOutcome::Failed { path, error } = outcome {
            error!("{}: {}", path, error);
        }
    }

    match config.output {
        OutputFormat::Text => print_hash_text(&outcomes),
        OutputFormat::Json => match serde_json::to_string_pretty(&outcomes) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    if any_failed(&outcomes) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_hash_text(outcomes: &[FileOutcome]) {
    for outcome in outcomes {
        let FileOutcome::Hashed(report) = outcome else {
            continue;
        };

        println!(
            "{}  {}  {} frame(s)  {}",
            report.fingerprint,
            report.format.name(),
            report.frames,
            report.path
        );

        for id in report.frame_identifiers.iter().flatten() {
            println!("    {}", id);
        }
    }
}

// =============================================================================
// Export Command
// =============================================================================

fn run_export(config: ExportConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let loader = ImageLoader::new();
    let loaded = match load(&loader, &config.file, config.mime.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("{}: {}", config.file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let written = match export_frames(&loaded.sequence, &config.out_dir) {
        Ok(written) => written,
        Err(e) => {
            error!("Failed to export to {}: {}", config.out_dir.display(), e);
            return ExitCode::FAILURE;
        }
    };

    for path in &written {
        println!("{}", path.display());
    }

    info!(
        "Exported {} of {} frame(s) from {} to {}",
        written.len(),
        loaded.sequence.len(),
        config.file.display(),
        config.out_dir.display()
    );

    ExitCode::SUCCESS
}

// =============================================================================
// Formats Command
// =============================================================================

fn run_formats(config: FormatsConfig) -> ExitCode {
    init_logging(config.verbose);

    let registry = FormatRegistry::new();

    match config.output {
        OutputFormat::Text => {
            println!(
                "{:<6} {:<12} {:<6} {:<6} {:<6} {}",
                "NAME", "MIME", "EXT", "DECODE", "ENCODE", "COMPOSITED"
            );
            for entry in registry.entries() {
                println!(
                    "{:<6} {:<12} {:<6} {:<6} {:<6} {}",
                    entry.kind.name(),
                    entry.kind.mime_type(),
                    entry.kind.extension(),
                    yes_no(entry.decode),
                    yes_no(entry.encode),
                    yes_no(entry.kind.requires_compositing()),
                );
            }
        }
        OutputFormat::Json => {
            let formats: Vec<serde_json::Value> = registry
                .entries()
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "format": entry.kind,
                        "mime_type": entry.kind.mime_type(),
                        "extension": entry.kind.extension(),
                        "decode": entry.decode,
                        "encode": entry.encode,
                        "requires_compositing": entry.kind.requires_compositing(),
                    })
                })
                .collect();

            match serde_json::to_string_pretty(&formats) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    error!("Failed to serialize formats: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    ExitCode::SUCCESS
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

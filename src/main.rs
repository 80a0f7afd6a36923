//! Tolk CLI entry point.

use anyhow::Result;
use clap::Parser;
use tolk::cli::commands::{self, ExportFlags};
use tolk::cli::{Cli, Commands};
use tolk::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("tolk={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Ensure data directories exist and sweep stale temp files
    std::fs::create_dir_all(settings.data_dir())?;
    std::fs::create_dir_all(settings.temp_dir())?;
    cleanup_temp_files(&settings.temp_dir());

    // Execute command
    match &cli.command {
        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Export {
            input,
            output,
            format,
            timestamps,
            no_timestamps,
            speakers,
            no_speakers,
            confidence,
            no_confidence,
        } => {
            let flags = ExportFlags {
                timestamps: resolve_flag(*timestamps, *no_timestamps),
                speakers: resolve_flag(*speakers, *no_speakers),
                confidence: resolve_flag(*confidence, *no_confidence),
            };
            commands::run_export(input, output.clone(), format.clone(), flags, settings)?;
        }

        Commands::Formats => {
            commands::run_formats()?;
        }

        Commands::Read { file } => {
            commands::run_read(file)?;
        }

        Commands::Budget { input, model, agent } => {
            commands::run_budget(input, model.clone(), agent.clone(), settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}

/// Resolve a --flag / --no-flag pair into an optional override.
fn resolve_flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Best-effort removal of stray files from the temp directory.
///
/// Failures are ignored; exports never depend on the temp directory.
fn cleanup_temp_files(temp_dir: &std::path::Path) {
    let Ok(entries) = std::fs::read_dir(temp_dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file() {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::debug!("could not remove temp file {}: {}", path.display(), e);
            }
        }
    }
}

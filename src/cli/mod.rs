//! CLI module for Tolk.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Tolk - Transcript export and AI copilot context
///
/// A local-first CLI toolkit for converting transcription results into
/// text, JSON, subtitle, and document formats, and for preparing AI
/// copilot context from transcripts and attached documents.
/// The name "Tolk" comes from the Norwegian word for "interpreter."
#[derive(Parser, Debug)]
#[command(name = "tolk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check system requirements and configuration
    Doctor,

    /// Export a transcription result to another file format
    Export {
        /// Path to a transcription result JSON file
        input: String,

        /// Output file (derived from the input name if not specified)
        #[arg(short, long)]
        output: Option<String>,

        /// Output format (txt, json, srt, vtt, md, html)
        #[arg(short, long)]
        format: Option<String>,

        /// Include segment timestamps
        #[arg(long, overrides_with = "no_timestamps")]
        timestamps: bool,

        /// Exclude segment timestamps
        #[arg(long)]
        no_timestamps: bool,

        /// Include speaker labels
        #[arg(long, overrides_with = "no_speakers")]
        speakers: bool,

        /// Exclude speaker labels
        #[arg(long)]
        no_speakers: bool,

        /// Include confidence scores
        #[arg(long, overrides_with = "no_confidence")]
        confidence: bool,

        /// Exclude confidence scores
        #[arg(long)]
        no_confidence: bool,
    },

    /// List available export formats
    Formats,

    /// Extract text from an attachment document
    Read {
        /// Path to the document file
        file: String,
    },

    /// Report the AI context budget for a transcript
    Budget {
        /// Path to a transcription result JSON file
        input: String,

        /// AI model to budget against
        #[arg(short, long)]
        model: Option<String>,

        /// Agent configuration JSON whose attachments count against the budget
        #[arg(short, long)]
        agent: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}

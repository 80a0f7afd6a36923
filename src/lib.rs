//! Tolk - Transcript Export and AI Copilot Context
//!
//! A local-first CLI toolkit for working with transcription results.
//!
//! The name "Tolk" comes from the Norwegian word for "interpreter."
//!
//! # Overview
//!
//! Tolk allows you to:
//! - Export transcription results to plain text, JSON, SRT, VTT,
//!   Markdown, and HTML
//! - Extract text from attachment documents for AI copilot actions
//! - Budget AI model context windows for transcripts and attachments
//! - Verify that external media tools (ffmpeg) are available
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `job` - Job and transcription result data models
//! - `export` - Export formatters and timestamp utilities
//! - `document` - Attachment text extraction
//! - `context` - Context window token budgeting
//! - `copilot` - Agent configuration and attachments
//!
//! # Example
//!
//! ```rust,no_run
//! use tolk::export::{formatter_for, ExportOptions};
//! use tolk::job::TranscriptionResult;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let json = std::fs::read_to_string("meeting.json")?;
//!     let result: TranscriptionResult = serde_json::from_str(&json)?;
//!
//!     let formatter = formatter_for("srt")?;
//!     let options = formatter.default_options();
//!     formatter.export(&result, Path::new("meeting.srt"), &options)?;
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod copilot;
pub mod document;
pub mod error;
pub mod export;
pub mod job;

pub use error::{Result, TolkError};

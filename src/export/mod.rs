//! Transcript export formatters (plain text, JSON, SRT, VTT, Markdown, HTML).
//!
//! Each formatter converts a [`TranscriptionResult`] into one output file
//! format. Formatters are stateless and safe to reuse across exports.

mod html;
mod json;
mod markdown;
mod plain_text;
mod srt;
mod vtt;

pub use html::HtmlFormatter;
pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use plain_text::PlainTextFormatter;
pub use srt::SrtFormatter;
pub use vtt::VttFormatter;

use crate::error::{Result, TolkError};
use crate::job::TranscriptionResult;
use std::path::{Path, PathBuf};

/// Toggles for the optional per-segment decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Include segment timestamps.
    pub timestamps: bool,
    /// Include speaker labels (only rendered when the segment has one).
    pub speakers: bool,
    /// Include confidence scores (only rendered when confidence > 0).
    pub confidence: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            timestamps: true,
            speakers: true,
            confidence: false,
        }
    }
}

/// A converter from a transcription result to one output file format.
pub trait ExportFormatter {
    /// Short identifier for this format (e.g. "txt", "json").
    fn format_id(&self) -> &'static str;

    /// Human-readable format name for display.
    fn display_name(&self) -> &'static str;

    /// File extension including the dot (e.g. ".txt").
    fn file_extension(&self) -> &'static str;

    /// Natural default options for this format.
    ///
    /// Plain text leaves timestamps off; structured formats include them.
    fn default_options(&self) -> ExportOptions {
        ExportOptions::default()
    }

    /// Render the result to a string in this format.
    fn render(&self, result: &TranscriptionResult, options: &ExportOptions) -> String;

    /// Write the rendered result to `output_path`.
    ///
    /// The write is whole-buffer and non-atomic; filesystem errors
    /// propagate to the caller.
    fn export(
        &self,
        result: &TranscriptionResult,
        output_path: &Path,
        options: &ExportOptions,
    ) -> Result<PathBuf> {
        let content = self.render(result, options);
        std::fs::write(output_path, content)?;
        Ok(output_path.to_path_buf())
    }
}

/// All available formatters, in display order.
pub fn all_formatters() -> Vec<Box<dyn ExportFormatter>> {
    vec![
        Box::new(PlainTextFormatter),
        Box::new(JsonFormatter),
        Box::new(SrtFormatter),
        Box::new(VttFormatter),
        Box::new(MarkdownFormatter),
        Box::new(HtmlFormatter),
    ]
}

/// Resolve a formatter by its `format_id`.
pub fn formatter_for(format_id: &str) -> Result<Box<dyn ExportFormatter>> {
    let wanted = format_id.to_lowercase();
    all_formatters()
        .into_iter()
        .find(|f| f.format_id() == wanted)
        .ok_or_else(|| TolkError::UnknownFormat(format_id.to_string()))
}

/// Format seconds as `HH:MM:SS.mmm`, truncating to millisecond precision.
pub fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0) as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let ms = total_ms % 1000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, ms)
}

/// Format seconds as an SRT timestamp (`HH:MM:SS,mmm`).
pub fn format_timestamp_srt(seconds: f64) -> String {
    format_timestamp(seconds).replace('.', ",")
}

/// Render a confidence value as a whole percentage, e.g. "90%".
pub(crate) fn format_confidence(confidence: f64) -> String {
    format!("{:.0}%", confidence * 100.0)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::job::{TranscriptSegment, TranscriptionResult};

    /// A result with known metadata for formatter tests.
    pub fn make_result(segments: Vec<TranscriptSegment>, full_text: &str) -> TranscriptionResult {
        TranscriptionResult {
            job_id: "test".to_string(),
            audio_file: "test.mp3".to_string(),
            provider: "test".to_string(),
            model: "test".to_string(),
            language: "en".to_string(),
            duration_seconds: 10.0,
            created_at: "2026-01-01T00:00:00".to_string(),
            segments,
            full_text: full_text.to_string(),
            ..Default::default()
        }
    }
}

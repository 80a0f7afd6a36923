//! Plain text export formatter.

use super::{format_confidence, format_timestamp, ExportFormatter, ExportOptions};
use crate::job::TranscriptionResult;

/// Export transcript as a simple plain-text file.
pub struct PlainTextFormatter;

impl ExportFormatter for PlainTextFormatter {
    fn format_id(&self) -> &'static str {
        "txt"
    }

    fn display_name(&self) -> &'static str {
        "Plain Text (.txt)"
    }

    fn file_extension(&self) -> &'static str {
        ".txt"
    }

    fn default_options(&self) -> ExportOptions {
        ExportOptions {
            timestamps: false,
            ..ExportOptions::default()
        }
    }

    fn render(&self, result: &TranscriptionResult, options: &ExportOptions) -> String {
        if result.segments.is_empty() {
            return result.full_text.clone();
        }

        let lines: Vec<String> = result
            .segments
            .iter()
            .map(|seg| {
                let mut parts: Vec<String> = Vec::new();
                if options.timestamps {
                    parts.push(format!("[{}]", format_timestamp(seg.start)));
                }
                if options.speakers && !seg.speaker.is_empty() {
                    parts.push(format!("{}:", seg.speaker));
                }
                parts.push(seg.text.clone());
                if options.confidence && seg.confidence > 0.0 {
                    parts.push(format!("({})", format_confidence(seg.confidence)));
                }
                parts.join(" ")
            })
            .collect();

        lines.join("\n\n")
    }
}

//! Markdown export formatter.

use super::{format_confidence, format_timestamp, ExportFormatter, ExportOptions};
use crate::job::TranscriptionResult;

/// Export transcript as a formatted Markdown document.
pub struct MarkdownFormatter;

impl ExportFormatter for MarkdownFormatter {
    fn format_id(&self) -> &'static str {
        "md"
    }

    fn display_name(&self) -> &'static str {
        "Markdown (.md)"
    }

    fn file_extension(&self) -> &'static str {
        ".md"
    }

    fn render(&self, result: &TranscriptionResult, options: &ExportOptions) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("# Transcript: {}", result.audio_file));
        lines.push(String::new());
        lines.push(format!("- **Provider**: {}", result.provider));
        lines.push(format!("- **Model**: {}", result.model));
        lines.push(format!("- **Language**: {}", result.language));
        lines.push(format!(
            "- **Duration**: {}",
            format_timestamp(result.duration_seconds)
        ));
        lines.push(format!("- **Date**: {}", result.created_at));
        lines.push(String::new());
        lines.push("---".to_string());
        lines.push(String::new());

        if result.segments.is_empty() {
            lines.push(result.full_text.clone());
        } else {
            let mut current_speaker = "";
            for seg in &result.segments {
                // Heading only when the speaker changes
                if options.speakers && !seg.speaker.is_empty() && seg.speaker != current_speaker {
                    current_speaker = &seg.speaker;
                    lines.push(format!("### {}", seg.speaker));
                    lines.push(String::new());
                }

                if options.timestamps {
                    lines.push(format!(
                        "> *{} — {}*",
                        format_timestamp(seg.start),
                        format_timestamp(seg.end)
                    ));
                }

                let mut text = seg.text.clone();
                if options.confidence && seg.confidence > 0.0 {
                    text.push_str(&format!(" _{}_", format_confidence(seg.confidence)));
                }
                lines.push(text);
                lines.push(String::new());
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::make_result;
    use crate::job::TranscriptSegment;

    fn two_speaker_result() -> TranscriptionResult {
        let mut a1 = TranscriptSegment::new(0.0, 2.0, "First point.");
        a1.speaker = "Alice".to_string();
        let mut a2 = TranscriptSegment::new(2.0, 4.0, "Second point.");
        a2.speaker = "Alice".to_string();
        let mut b = TranscriptSegment::new(4.0, 6.0, "A reply.");
        b.speaker = "Bob".to_string();
        make_result(vec![a1, a2, b], "")
    }

    #[test]
    fn test_title_and_metadata() {
        let md = MarkdownFormatter.render(&two_speaker_result(), &ExportOptions::default());
        assert!(md.starts_with("# Transcript: test.mp3"));
        assert!(md.contains("- **Provider**: test"));
        assert!(md.contains("- **Duration**: 00:00:10.000"));
    }

    #[test]
    fn test_speaker_heading_only_on_change() {
        let md = MarkdownFormatter.render(&two_speaker_result(), &ExportOptions::default());
        assert_eq!(md.matches("### Alice").count(), 1);
        assert_eq!(md.matches("### Bob").count(), 1);
    }

    #[test]
    fn test_timestamp_blockquotes() {
        let md = MarkdownFormatter.render(&two_speaker_result(), &ExportOptions::default());
        assert!(md.contains("> *00:00:00.000 — 00:00:02.000*"));

        let no_ts = MarkdownFormatter.render(
            &two_speaker_result(),
            &ExportOptions {
                timestamps: false,
                ..ExportOptions::default()
            },
        );
        assert!(!no_ts.contains("> *"));
    }

    #[test]
    fn test_confidence_suffix() {
        let mut seg = TranscriptSegment::new(0.0, 1.0, "Sure thing.");
        seg.confidence = 0.85;
        let result = make_result(vec![seg], "");
        let md = MarkdownFormatter.render(
            &result,
            &ExportOptions {
                confidence: true,
                ..ExportOptions::default()
            },
        );
        assert!(md.contains("Sure thing. _85%_"));
    }

    #[test]
    fn test_full_text_fallback() {
        let result = make_result(vec![], "Just text");
        let md = MarkdownFormatter.render(&result, &ExportOptions::default());
        assert!(md.contains("Just text"));
    }
}

//! SubRip (.srt) subtitle export formatter.

use super::{format_timestamp_srt, ExportFormatter, ExportOptions};
use crate::job::TranscriptionResult;

/// Export transcript as SubRip (.srt) subtitle format.
///
/// Timestamps are always present (they are the format), so the
/// timestamps and confidence flags are ignored.
pub struct SrtFormatter;

impl ExportFormatter for SrtFormatter {
    fn format_id(&self) -> &'static str {
        "srt"
    }

    fn display_name(&self) -> &'static str {
        "SubRip Subtitles (.srt)"
    }

    fn file_extension(&self) -> &'static str {
        ".srt"
    }

    fn render(&self, result: &TranscriptionResult, options: &ExportOptions) -> String {
        let mut lines: Vec<String> = Vec::new();

        if result.segments.is_empty() {
            // Single cue spanning the full duration
            lines.push("1".to_string());
            lines.push(format!(
                "{} --> {}",
                format_timestamp_srt(0.0),
                format_timestamp_srt(result.duration_seconds)
            ));
            lines.push(result.full_text.clone());
            lines.push(String::new());
        } else {
            for (idx, seg) in result.segments.iter().enumerate() {
                lines.push((idx + 1).to_string());
                lines.push(format!(
                    "{} --> {}",
                    format_timestamp_srt(seg.start),
                    format_timestamp_srt(seg.end)
                ));
                let text = if options.speakers && !seg.speaker.is_empty() {
                    format!("[{}] {}", seg.speaker, seg.text)
                } else {
                    seg.text.clone()
                };
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

    #[test]
    fn test_properties() {
        let fmt = SrtFormatter;
        assert_eq!(fmt.format_id(), "srt");
        assert_eq!(fmt.file_extension(), ".srt");
    }

    #[test]
    fn test_numbered_cues_with_comma_timestamps() {
        let result = make_result(
            vec![
                TranscriptSegment::new(0.0, 2.5, "Hello world."),
                TranscriptSegment::new(2.5, 5.0, "This is a test."),
            ],
            "",
        );
        let srt = SrtFormatter.render(&result, &ExportOptions::default());
        assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:02,500\nHello world."));
        assert!(srt.contains("2\n00:00:02,500 --> 00:00:05,000\nThis is a test."));
    }

    #[test]
    fn test_speaker_prefix() {
        let mut seg = TranscriptSegment::new(0.0, 2.0, "Hi there");
        seg.speaker = "Alice".to_string();
        let result = make_result(vec![seg], "");
        let srt = SrtFormatter.render(&result, &ExportOptions::default());
        assert!(srt.contains("[Alice] Hi there"));

        let no_speakers = SrtFormatter.render(
            &result,
            &ExportOptions {
                speakers: false,
                ..ExportOptions::default()
            },
        );
        assert!(!no_speakers.contains("[Alice]"));
        assert!(no_speakers.contains("Hi there"));
    }

    #[test]
    fn test_fallback_single_cue_for_full_text() {
        let result = make_result(vec![], "Just the text");
        let srt = SrtFormatter.render(&result, &ExportOptions::default());
        assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:10,000\nJust the text"));
    }
}

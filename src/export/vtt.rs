//! WebVTT (.vtt) subtitle export formatter.

use super::{format_timestamp, ExportFormatter, ExportOptions};
use crate::job::TranscriptionResult;

/// Export transcript as WebVTT (.vtt) subtitle format.
pub struct VttFormatter;

impl ExportFormatter for VttFormatter {
    fn format_id(&self) -> &'static str {
        "vtt"
    }

    fn display_name(&self) -> &'static str {
        "WebVTT Subtitles (.vtt)"
    }

    fn file_extension(&self) -> &'static str {
        ".vtt"
    }

    fn render(&self, result: &TranscriptionResult, options: &ExportOptions) -> String {
        let mut lines: Vec<String> = vec!["WEBVTT".to_string(), String::new()];

        if result.segments.is_empty() {
            lines.push("1".to_string());
            lines.push(format!(
                "{} --> {}",
                format_timestamp(0.0),
                format_timestamp(result.duration_seconds)
            ));
            lines.push(result.full_text.clone());
            lines.push(String::new());
        } else {
            for (idx, seg) in result.segments.iter().enumerate() {
                lines.push((idx + 1).to_string());
                lines.push(format!(
                    "{} --> {}",
                    format_timestamp(seg.start),
                    format_timestamp(seg.end)
                ));
                let text = if options.speakers && !seg.speaker.is_empty() {
                    format!("<v {}>{}", seg.speaker, seg.text)
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
    fn test_header_and_dot_timestamps() {
        let result = make_result(vec![TranscriptSegment::new(0.0, 2.5, "Hello world.")], "");
        let vtt = VttFormatter.render(&result, &ExportOptions::default());
        assert!(vtt.starts_with("WEBVTT\n"));
        assert!(vtt.contains("00:00:00.000 --> 00:00:02.500"));
    }

    #[test]
    fn test_voice_tag_for_speakers() {
        let mut seg = TranscriptSegment::new(0.0, 2.0, "Hi");
        seg.speaker = "Bob".to_string();
        let result = make_result(vec![seg], "");
        let vtt = VttFormatter.render(&result, &ExportOptions::default());
        assert!(vtt.contains("<v Bob>Hi"));
    }

    #[test]
    fn test_fallback_cue_spans_duration() {
        let result = make_result(vec![], "Only text");
        let vtt = VttFormatter.render(&result, &ExportOptions::default());
        assert!(vtt.contains("00:00:00.000 --> 00:00:10.000"));
        assert!(vtt.contains("Only text"));
    }
}

//! JSON export formatter.

use super::{ExportFormatter, ExportOptions};
use crate::job::TranscriptionResult;
use serde::Serialize;
use std::collections::BTreeMap;

/// Export transcript as structured JSON.
pub struct JsonFormatter;

/// JSON-serializable view of a result with optional fields stripped.
#[derive(Debug, Serialize)]
struct JsonExport<'a> {
    job_id: &'a str,
    audio_file: &'a str,
    provider: &'a str,
    model: &'a str,
    language: &'a str,
    duration_seconds: f64,
    created_at: &'a str,
    segments: Vec<JsonSegment<'a>>,
    full_text: &'a str,
    speaker_map: &'a BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct JsonSegment<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<f64>,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speaker: Option<&'a str>,
}

impl ExportFormatter for JsonFormatter {
    fn format_id(&self) -> &'static str {
        "json"
    }

    fn display_name(&self) -> &'static str {
        "JSON Data (.json)"
    }

    fn file_extension(&self) -> &'static str {
        ".json"
    }

    fn render(&self, result: &TranscriptionResult, options: &ExportOptions) -> String {
        let export = JsonExport {
            job_id: &result.job_id,
            audio_file: &result.audio_file,
            provider: &result.provider,
            model: &result.model,
            language: &result.language,
            duration_seconds: result.duration_seconds,
            created_at: &result.created_at,
            segments: result
                .segments
                .iter()
                .map(|s| JsonSegment {
                    start: options.timestamps.then_some(s.start),
                    end: options.timestamps.then_some(s.end),
                    text: &s.text,
                    confidence: options.confidence.then_some(s.confidence),
                    speaker: options.speakers.then_some(s.speaker.as_str()),
                })
                .collect(),
            full_text: &result.full_text,
            speaker_map: &result.speaker_map,
        };

        serde_json::to_string_pretty(&export).unwrap_or_else(|_| "{}".to_string())
    }
}

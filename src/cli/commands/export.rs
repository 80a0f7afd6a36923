//! Export command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::export::{formatter_for, ExportOptions};
use crate::job::TranscriptionResult;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Requested overrides for the optional export decorations.
///
/// Unset values fall back to the configuration, then to the
/// formatter's own defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportFlags {
    pub timestamps: Option<bool>,
    pub speakers: Option<bool>,
    pub confidence: Option<bool>,
}

/// Run the export command.
pub fn run_export(
    input: &str,
    output: Option<String>,
    format: Option<String>,
    flags: ExportFlags,
    settings: Settings,
) -> Result<()> {
    let format_id = format.unwrap_or_else(|| settings.export.default_format.clone());
    let formatter = formatter_for(&format_id)?;

    let content = std::fs::read_to_string(input)?;
    let result: TranscriptionResult = serde_json::from_str(&content)?;

    let defaults = formatter.default_options();
    let options = ExportOptions {
        timestamps: flags
            .timestamps
            .or(settings.export.include_timestamps)
            .unwrap_or(defaults.timestamps),
        speakers: flags
            .speakers
            .or(settings.export.include_speakers)
            .unwrap_or(defaults.speakers),
        confidence: flags
            .confidence
            .or(settings.export.include_confidence)
            .unwrap_or(defaults.confidence),
    };

    let output_path = match output {
        Some(path) => PathBuf::from(path),
        None => Path::new(input).with_extension(formatter.file_extension().trim_start_matches('.')),
    };

    tracing::debug!(
        format = formatter.format_id(),
        output = %output_path.display(),
        segments = result.segments.len(),
        "exporting transcript"
    );

    let written = formatter.export(&result, &output_path, &options)?;

    Output::success(&format!(
        "Exported {} to {} ({}, {} segments)",
        result.audio_file,
        written.display(),
        formatter.display_name(),
        result.segments.len()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::TranscriptSegment;

    fn write_result_file(dir: &Path) -> PathBuf {
        let mut seg = TranscriptSegment::new(5.0, 7.25, "hello");
        seg.speaker = "A".to_string();
        seg.confidence = 0.9;
        let result = TranscriptionResult {
            job_id: "j1".to_string(),
            audio_file: "call.mp3".to_string(),
            duration_seconds: 10.0,
            segments: vec![seg],
            ..Default::default()
        };
        let path = dir.join("call.json");
        std::fs::write(&path, serde_json::to_string(&result).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_export_to_txt_with_flag_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_result_file(dir.path());
        let output = dir.path().join("out.txt");

        run_export(
            input.to_str().unwrap(),
            Some(output.to_string_lossy().into_owned()),
            Some("txt".to_string()),
            ExportFlags {
                timestamps: Some(true),
                speakers: Some(true),
                confidence: Some(true),
            },
            Settings::default(),
        )
        .unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content, "[00:00:05.000] A: hello (90%)");
    }

    #[test]
    fn test_output_path_derived_from_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_result_file(dir.path());

        run_export(
            input.to_str().unwrap(),
            None,
            Some("srt".to_string()),
            ExportFlags::default(),
            Settings::default(),
        )
        .unwrap();

        assert!(dir.path().join("call.srt").exists());
    }

    #[test]
    fn test_unknown_format_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_result_file(dir.path());
        let err = run_export(
            input.to_str().unwrap(),
            None,
            Some("docx".to_string()),
            ExportFlags::default(),
            Settings::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Unknown export format"));
    }
}

//! Data models for transcription jobs and their results.

use crate::copilot::Attachment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Lifecycle states for a transcription job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Pending,
    Transcoding,
    Transcribing,
    Completed,
    Failed,
    Cancelled,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobStatus::Pending => "Pending",
            JobStatus::Transcoding => "Transcoding",
            JobStatus::Transcribing => "Transcribing",
            JobStatus::Completed => "Completed",
            JobStatus::Failed => "Failed",
            JobStatus::Cancelled => "Cancelled",
        };
        write!(f, "{}", s)
    }
}

/// A single segment of transcription output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Transcribed text content.
    pub text: String,
    /// Recognition confidence in 0..=1. Zero means unset/unknown.
    #[serde(default)]
    pub confidence: f64,
    /// Speaker label. Empty when diarization was not performed.
    #[serde(default)]
    pub speaker: String,
}

impl TranscriptSegment {
    /// Create a segment without speaker or confidence information.
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            confidence: 0.0,
            speaker: String::new(),
        }
    }

    /// Duration of this segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Complete transcription output for a job.
///
/// When `segments` is non-empty it is authoritative for line-by-line
/// export; when empty, `full_text` is the sole content.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TranscriptionResult {
    pub job_id: String,
    pub audio_file: String,
    pub provider: String,
    pub model: String,
    pub language: String,
    pub duration_seconds: f64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub segments: Vec<TranscriptSegment>,
    #[serde(default)]
    pub full_text: String,
    /// Maps raw diarization labels to user-assigned display names.
    #[serde(default)]
    pub speaker_map: BTreeMap<String, String>,
}

impl TranscriptionResult {
    /// Concatenated segment text, or `full_text` when there are no segments.
    pub fn text(&self) -> String {
        if self.segments.is_empty() {
            return self.full_text.clone();
        }
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Represents a transcription job in the queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    pub id: String,
    pub file_path: String,
    pub file_name: String,
    pub file_size_bytes: u64,
    pub duration_seconds: f64,
    pub status: JobStatus,
    pub provider: String,
    pub model: String,
    pub language: String,
    pub created_at: String,
    pub started_at: String,
    pub completed_at: String,
    pub progress_percent: f64,
    pub cost_estimate: f64,
    pub cost_actual: f64,
    pub transcript_path: String,
    pub error_message: String,
    pub include_timestamps: bool,
    pub include_diarization: bool,
    /// Documents attached to this job for AI copilot actions.
    pub attachments: Vec<Attachment>,
    pub result: Option<TranscriptionResult>,
}

impl Default for Job {
    fn default() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            file_path: String::new(),
            file_name: String::new(),
            file_size_bytes: 0,
            duration_seconds: 0.0,
            status: JobStatus::Pending,
            provider: String::new(),
            model: String::new(),
            language: "auto".to_string(),
            created_at: chrono::Local::now().to_rfc3339(),
            started_at: String::new(),
            completed_at: String::new(),
            progress_percent: 0.0,
            cost_estimate: 0.0,
            cost_actual: 0.0,
            transcript_path: String::new(),
            error_message: String::new(),
            include_timestamps: true,
            include_diarization: false,
            attachments: Vec::new(),
            result: None,
        }
    }
}

impl Job {
    /// Human-readable name for display in the queue.
    pub fn display_name(&self) -> String {
        if !self.file_name.is_empty() {
            return self.file_name.clone();
        }
        Path::new(&self.file_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Human-readable status string.
    pub fn status_text(&self) -> String {
        if self.status == JobStatus::Transcribing && self.progress_percent > 0.0 {
            return format!("Transcribing ({:.0}%)", self.progress_percent);
        }
        self.status.to_string()
    }

    /// Formatted cost string.
    pub fn cost_display(&self) -> String {
        if self.cost_estimate > 0.0 {
            format!("~${:.4}", self.cost_estimate)
        } else {
            "Free".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_text_prefers_segments() {
        let result = TranscriptionResult {
            segments: vec![
                TranscriptSegment::new(0.0, 2.0, "Hello"),
                TranscriptSegment::new(2.0, 4.0, "world"),
            ],
            full_text: "stale".to_string(),
            ..Default::default()
        };
        assert_eq!(result.text(), "Hello world");
    }

    #[test]
    fn test_result_text_falls_back_to_full_text() {
        let result = TranscriptionResult {
            full_text: "Only full text".to_string(),
            ..Default::default()
        };
        assert_eq!(result.text(), "Only full text");
    }

    #[test]
    fn test_job_display_name_from_path() {
        let job = Job {
            file_path: "/audio/meeting.mp3".to_string(),
            ..Default::default()
        };
        assert_eq!(job.display_name(), "meeting.mp3");
    }

    #[test]
    fn test_job_status_text_with_progress() {
        let job = Job {
            status: JobStatus::Transcribing,
            progress_percent: 42.0,
            ..Default::default()
        };
        assert_eq!(job.status_text(), "Transcribing (42%)");
    }

    #[test]
    fn test_job_cost_display() {
        let mut job = Job::default();
        assert_eq!(job.cost_display(), "Free");
        job.cost_estimate = 0.0123;
        assert_eq!(job.cost_display(), "~$0.0123");
    }

    #[test]
    fn test_job_roundtrip_json() {
        let job = Job {
            file_name: "call.wav".to_string(),
            status: JobStatus::Completed,
            ..Default::default()
        };
        let json = serde_json::to_string(&job).unwrap();
        let back: Job = serde_json::from_str(&json).unwrap();
        assert_eq!(back.file_name, "call.wav");
        assert_eq!(back.status, JobStatus::Completed);
    }

    #[test]
    fn test_segment_duration() {
        let seg = TranscriptSegment::new(5.0, 7.25, "hello");
        assert!((seg.duration() - 2.25).abs() < f64::EPSILON);
    }
}

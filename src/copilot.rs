//! Copilot agent configuration and attachment handling.
//!
//! An agent configuration describes how the AI copilot behaves for a
//! user: its instructions, model, enabled tools, and any reference
//! documents attached for extra context.

use crate::document;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A user-supplied reference document for AI-action context.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Attachment {
    /// Path to the document file.
    pub file_path: String,
    /// Optional display name shown instead of the file name.
    pub display_name: String,
    /// Optional instructions on how the document should be used.
    pub instructions: String,
}

impl Attachment {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    /// Display label: the display name, or the file name as fallback.
    pub fn label(&self) -> String {
        if !self.display_name.is_empty() {
            return self.display_name.clone();
        }
        Path::new(&self.file_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_path.clone())
    }
}

/// Configuration for a custom copilot agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentConfig {
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub model: String,
    pub tools_enabled: Vec<String>,
    pub temperature: f64,
    pub max_tokens: usize,
    pub welcome_message: String,
    /// Documents attached to every action run with this agent.
    pub attachments: Vec<Attachment>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: "Transcript Assistant".to_string(),
            description: "An AI assistant for analyzing audio transcripts".to_string(),
            instructions: "You are a helpful transcript assistant. You help users understand, \
                 analyze, and work with audio transcripts. You can summarize content, \
                 identify speakers, find specific topics, and answer questions about \
                 the transcript. Be concise, clear, and helpful."
                .to_string(),
            model: "gpt-4o".to_string(),
            tools_enabled: vec![
                "search_transcript".to_string(),
                "get_speakers".to_string(),
                "get_transcript_stats".to_string(),
            ],
            temperature: 0.3,
            max_tokens: 4096,
            welcome_message: "Hello! I'm your transcript assistant. Ask me to summarize, \
                 find topics or quotes, identify speakers, or answer questions about \
                 the content."
                .to_string(),
            attachments: Vec::new(),
        }
    }
}

impl AgentConfig {
    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load configuration from a JSON file. Unknown keys are ignored.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Build the attachment context block for an AI prompt.
///
/// Each attachment is framed with its label and any per-attachment
/// usage instructions; unreadable files contribute a bracketed error
/// line instead of failing the whole action.
pub fn build_attachments_text(attachments: &[Attachment]) -> String {
    let mut parts: Vec<String> = Vec::new();

    for att in attachments {
        let content = document::read_document_safe(&att.file_path);
        let label = att.label();
        let mut header = format!("=== Document: {label} ===");
        if !att.instructions.is_empty() {
            header.push_str(&format!("\nInstructions: {}", att.instructions));
        }
        parts.push(format!("{header}\n{content}\n=== End: {label} ==="));
    }

    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_label_fallback() {
        let att = Attachment::new("/docs/report.md");
        assert_eq!(att.label(), "report.md");

        let named = Attachment {
            display_name: "Q4 Report".to_string(),
            ..Attachment::new("/docs/report.md")
        };
        assert_eq!(named.label(), "Q4 Report");
    }

    #[test]
    fn test_attachment_roundtrip() {
        let original = Attachment {
            file_path: "/x/notes.txt".to_string(),
            display_name: "Notes".to_string(),
            instructions: "Use as reference".to_string(),
        };
        let json = serde_json::to_string(&original).unwrap();
        let restored: Attachment = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_attachment_deserializes_with_missing_fields() {
        let att: Attachment = serde_json::from_str(r#"{"file_path": "/x.txt"}"#).unwrap();
        assert_eq!(att.file_path, "/x.txt");
        assert!(att.display_name.is_empty());
    }

    #[test]
    fn test_agent_config_defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.model, "gpt-4o");
        assert!(config.attachments.is_empty());
        assert!(config.tools_enabled.contains(&"search_transcript".to_string()));
    }

    #[test]
    fn test_agent_config_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.json");

        let config = AgentConfig {
            name: "Meeting Bot".to_string(),
            attachments: vec![Attachment::new("/docs/glossary.txt")],
            ..AgentConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = AgentConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_agent_config_ignores_unknown_keys() {
        let json = r#"{"name": "X", "some_future_field": 42}"#;
        let config: AgentConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.name, "X");
        // Everything else falls back to defaults
        assert_eq!(config.model, "gpt-4o");
    }

    #[test]
    fn test_build_attachments_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facts.txt");
        std::fs::write(&path, "The sky is blue.").unwrap();

        let attachments = vec![Attachment {
            file_path: path.to_string_lossy().into_owned(),
            display_name: String::new(),
            instructions: "Treat as ground truth".to_string(),
        }];
        let text = build_attachments_text(&attachments);
        assert!(text.contains("=== Document: facts.txt ==="));
        assert!(text.contains("Instructions: Treat as ground truth"));
        assert!(text.contains("The sky is blue."));
        assert!(text.contains("=== End: facts.txt ==="));
    }

    #[test]
    fn test_build_attachments_text_with_unreadable_file() {
        let attachments = vec![Attachment::new("/no/such/doc.txt")];
        let text = build_attachments_text(&attachments);
        assert!(text.contains("[Error reading doc.txt:"));
    }
}

//! Configuration settings for Tolk.

use crate::context::{ContextWindowSettings, DEFAULT_CHARS_PER_TOKEN, FitStrategy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub export: ExportSettings,
    pub ai: AiSettings,
    pub copilot: CopilotSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Directory for temporary files.
    pub temp_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.tolk".to_string(),
            temp_dir: "/tmp/tolk".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Export defaults applied when the CLI flags are not given.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Default export format id.
    pub default_format: String,
    /// Override the formatter's timestamp default (None = per-format).
    pub include_timestamps: Option<bool>,
    /// Override the formatter's speaker default.
    pub include_speakers: Option<bool>,
    /// Override the formatter's confidence default.
    pub include_confidence: Option<bool>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            default_format: "txt".to_string(),
            include_timestamps: None,
            include_speakers: None,
            include_confidence: None,
        }
    }
}

/// AI model and context budgeting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    /// Default model for copilot actions.
    pub model: String,
    /// Transcript fitting strategy (truncate, tail, head_tail, smart).
    pub context_strategy: FitStrategy,
    /// Fraction of available context allocated to the transcript.
    pub transcript_budget_pct: f64,
    /// Tokens reserved for the model's response.
    pub response_reserve_tokens: usize,
    /// Maximum conversation turns kept in history (0 = unlimited).
    pub max_conversation_turns: usize,
    /// In head_tail strategy, fraction of budget for the head portion.
    pub head_tail_ratio: f64,
    /// Characters-per-token ratio for token estimation.
    pub chars_per_token: f64,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            context_strategy: FitStrategy::Smart,
            transcript_budget_pct: 0.70,
            response_reserve_tokens: 4096,
            max_conversation_turns: 20,
            head_tail_ratio: 0.6,
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
        }
    }
}

impl AiSettings {
    /// Context window settings derived from this configuration.
    pub fn context_settings(&self) -> ContextWindowSettings {
        ContextWindowSettings {
            strategy: self.context_strategy,
            transcript_budget_pct: self.transcript_budget_pct,
            response_reserve_tokens: self.response_reserve_tokens,
            max_conversation_turns: self.max_conversation_turns,
            head_tail_ratio: self.head_tail_ratio,
            chars_per_token: self.chars_per_token,
        }
    }
}

/// Copilot agent settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CopilotSettings {
    /// Path to the saved agent configuration JSON (None = defaults).
    pub agent_config_path: Option<String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::TolkError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tolk")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded temp directory path.
    pub fn temp_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.temp_dir)
    }
}

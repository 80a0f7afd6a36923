//! Configuration module for Tolk.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{AiSettings, CopilotSettings, ExportSettings, GeneralSettings, Settings};

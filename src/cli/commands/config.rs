//! Config command - show configuration and its location.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("failed to render configuration: {}", e))?;
            println!("{}", toml);
        }
        ConfigAction::Path => {
            let path = Settings::default_config_path();
            println!("{}", path.display());
            if !path.exists() {
                Output::info("File does not exist yet; defaults are in effect.");
            }
        }
    }
    Ok(())
}

//! Formats command - list available export formats.

use crate::cli::Output;
use crate::export::all_formatters;
use anyhow::Result;

/// Run the formats command.
pub fn run_formats() -> Result<()> {
    Output::header("Export Formats");
    for fmt in all_formatters() {
        let defaults = fmt.default_options();
        let mut notes: Vec<&str> = Vec::new();
        if defaults.timestamps {
            notes.push("timestamps");
        }
        if defaults.speakers {
            notes.push("speakers");
        }
        if defaults.confidence {
            notes.push("confidence");
        }
        Output::list_item(&format!(
            "{:<6} {} (default: {})",
            fmt.format_id(),
            fmt.display_name(),
            notes.join(", ")
        ));
    }
    Ok(())
}

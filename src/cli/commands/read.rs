//! Read command - extract text from an attachment document.

use crate::cli::Output;
use crate::document;
use anyhow::Result;

/// Run the read command. Prints extracted text to stdout.
pub fn run_read(file: &str) -> Result<()> {
    if !document::is_supported(file) {
        Output::warning(&format!(
            "'{}' is not a recognized document type; attempting plain-text read",
            file
        ));
    }
    let text = document::read_document(file)?;
    println!("{}", text);
    Ok(())
}

//! Document reader for extracting text from attachment files.
//!
//! Attachments supply supplementary context for AI copilot actions.
//! Each reader returns plain-text content suitable for injection into
//! an LLM prompt. Only text-family formats are supported; binary
//! document formats (.docx, .xlsx, .pdf, .rtf) are rejected with a
//! descriptive error.

use crate::error::{Result, TolkError};
use std::path::Path;

/// File extensions supported for text extraction, lowercase with dot.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    ".txt", ".md", ".csv", ".log", ".json", ".xml", ".yaml", ".yml", ".ini", ".cfg", ".conf",
    ".rst", ".tsv", ".html", ".htm",
];

/// Binary formats the reader recognizes but cannot extract.
const UNSUPPORTED_BINARY: &[&str] = &[".docx", ".xlsx", ".xls", ".pdf", ".rtf"];

/// Maximum file size to read (10 MB).
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Check whether the file extension is supported for text extraction.
pub fn is_supported(path: impl AsRef<Path>) -> bool {
    match extension_of(path.as_ref()) {
        Some(ext) => SUPPORTED_EXTENSIONS.contains(&ext.as_str()),
        None => false,
    }
}

/// Read a document and return its text content.
///
/// Errors if the file does not exist, exceeds 10 MB, or is a binary
/// document format. Unknown extensions are attempted as plain text.
pub fn read_document(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(TolkError::Document(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let size = std::fs::metadata(path)?.len();
    if size > MAX_FILE_SIZE {
        return Err(TolkError::Document(format!(
            "File is too large ({:.1} MB). Maximum supported size is {} MB.",
            size as f64 / 1024.0 / 1024.0,
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    let ext = extension_of(path);
    if let Some(ext) = &ext {
        if UNSUPPORTED_BINARY.contains(&ext.as_str()) {
            return Err(TolkError::Document(format!(
                "Unsupported document format '{}'. Convert the file to a plain-text format first.",
                ext
            )));
        }
        if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            tracing::info!("unknown extension '{}', attempting plain-text read", ext);
        }
    }

    read_text(path)
}

/// Read a document, returning an error string on failure instead of erroring.
pub fn read_document_safe(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    match read_document(path) {
        Ok(text) => text,
        Err(e) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            format!("[Error reading {}: {}]", name, e)
        }
    }
}

/// Read a text file, falling back to lossy decoding for non-UTF-8 content.
fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    // Strip a UTF-8 BOM if present
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(&bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_string()),
        Err(_) => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

/// Lowercase extension with leading dot, if any.
fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
}

//! External dependency checks.
//!
//! Validates that required tools are available before starting
//! operations that would otherwise fail midway. The primary dependency
//! is ffmpeg, used by the media preprocessing pipeline.

use crate::error::{Result, TolkError};
use std::path::Path;
use std::process::Command;

/// Check whether ffmpeg is reachable on PATH or at common locations.
///
/// Never errors; absence simply yields false. No caching across calls.
pub fn is_ffmpeg_available() -> bool {
    probe_tool("ffmpeg") || ffmpeg_fallback_paths().iter().any(|p| Path::new(p).exists())
}

/// Well-known install locations checked when PATH lookup fails.
fn ffmpeg_fallback_paths() -> &'static [&'static str] {
    if cfg!(target_os = "windows") {
        &[
            r"C:\ffmpeg\bin\ffmpeg.exe",
            r"C:\Program Files\ffmpeg\bin\ffmpeg.exe",
            r"C:\ProgramData\chocolatey\bin\ffmpeg.exe",
        ]
    } else if cfg!(target_os = "macos") {
        &["/opt/homebrew/bin/ffmpeg", "/usr/local/bin/ffmpeg"]
    } else {
        &["/usr/bin/ffmpeg", "/usr/local/bin/ffmpeg"]
    }
}

/// True if the tool runs successfully from the search path.
pub fn probe_tool(name: &str) -> bool {
    // ffmpeg/ffprobe use -version (single dash), others use --version
    let version_arg = match name {
        "ffmpeg" | "ffprobe" => "-version",
        _ => "--version",
    };
    matches!(
        Command::new(name).arg(version_arg).output(),
        Ok(output) if output.status.success()
    )
}

/// Check that an external tool is available, with a typed error if not.
pub fn check_tool(name: &str) -> Result<()> {
    let version_arg = match name {
        "ffmpeg" | "ffprobe" => "-version",
        _ => "--version",
    };
    match Command::new(name).arg(version_arg).output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(TolkError::ToolFailed(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(TolkError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(TolkError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

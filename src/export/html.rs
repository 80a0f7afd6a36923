//! HTML export formatter.

use super::{format_confidence, format_timestamp, ExportFormatter, ExportOptions};
use crate::job::TranscriptionResult;

/// Export transcript as a styled standalone HTML document.
pub struct HtmlFormatter;

const STYLE: &str = "\
  body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.7; max-width: 800px; margin: 2rem auto; padding: 0 1rem;
    color: #222; background: #fafafa;
  }
  h1 { font-size: 1.5rem; border-bottom: 2px solid #0078d4; padding-bottom: .5rem; }
  .meta { color: #555; font-size: 0.9rem; margin-bottom: 1.5rem; }
  .segment { margin-bottom: 1rem; }
  .timestamp { color: #0078d4; font-size: 0.85rem; font-family: monospace; }
  .speaker { font-weight: bold; color: #333; }
  .confidence { color: #888; font-size: 0.8rem; }
  @media (prefers-color-scheme: dark) {
    body { color: #ddd; background: #1e1e1e; }
    h1 { border-color: #4fc3f7; }
    .timestamp { color: #4fc3f7; }
    .speaker { color: #eee; }
    .meta { color: #aaa; }
  }
";

impl ExportFormatter for HtmlFormatter {
    fn format_id(&self) -> &'static str {
        "html"
    }

    fn display_name(&self) -> &'static str {
        "HTML Document (.html)"
    }

    fn file_extension(&self) -> &'static str {
        ".html"
    }

    fn render(&self, result: &TranscriptionResult, options: &ExportOptions) -> String {
        let mut segments_html: Vec<String> = Vec::new();

        if result.segments.is_empty() {
            segments_html.push(format!("<p>{}</p>", escape(&result.full_text)));
        } else {
            for seg in &result.segments {
                let mut parts: Vec<String> = vec!["<div class=\"segment\">".to_string()];
                if options.timestamps {
                    parts.push(format!(
                        "<span class=\"timestamp\">[{} — {}]</span> ",
                        format_timestamp(seg.start),
                        format_timestamp(seg.end)
                    ));
                }
                if options.speakers && !seg.speaker.is_empty() {
                    parts.push(format!(
                        "<span class=\"speaker\">{}:</span> ",
                        escape(&seg.speaker)
                    ));
                }
                parts.push(format!("<span>{}</span>", escape(&seg.text)));
                if options.confidence && seg.confidence > 0.0 {
                    parts.push(format!(
                        " <span class=\"confidence\">({})</span>",
                        format_confidence(seg.confidence)
                    ));
                }
                parts.push("</div>".to_string());
                segments_html.push(parts.concat());
            }
        }

        format!(
            "<!DOCTYPE html>\n\
             <html lang=\"{language}\">\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>Transcript: {title}</title>\n\
             <style>\n{style}</style>\n\
             </head>\n\
             <body>\n\
             <h1>Transcript: {title}</h1>\n\
             <div class=\"meta\">\n\
             <p>Provider: {provider} | Model: {model} | Language: {language}\n\
             | Duration: {duration} | Date: {date}</p>\n\
             </div>\n\
             <div class=\"transcript\">\n\
             {segments}\n\
             </div>\n\
             </body>\n\
             </html>\n",
            language = escape(&result.language),
            title = escape(&result.audio_file),
            style = STYLE,
            provider = escape(&result.provider),
            model = escape(&result.model),
            duration = format_timestamp(result.duration_seconds),
            date = escape(&result.created_at),
            segments = segments_html.join("\n"),
        )
    }
}

/// HTML-escape a string.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

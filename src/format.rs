use clap::ValueEnum;

use crate::error::{Result, TranscriptError};
use crate::TranscriptResult;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Paragraphs separated by blank lines
    Text,
    /// The full result as JSON
    Json,
    /// Title heading, caption details and paragraphs
    Markdown,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

pub fn render(result: &TranscriptResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(result.full_text.clone()),
        OutputFormat::Json => serde_json::to_string_pretty(result).map_err(|e| {
            TranscriptError::TranscriptUnavailable(format!("failed to serialize transcript: {}", e))
        }),
        OutputFormat::Markdown => Ok(format_as_markdown(result)),
    }
}

fn format_as_markdown(result: &TranscriptResult) -> String {
    let mut out = format!(
        "# {}\n\n_{} • {} • video {}_\n",
        result.title,
        result.track_type.label(),
        result.source_language.to_uppercase(),
        result.video_id
    );
    for paragraph in &result.paragraphs {
        out.push('\n');
        out.push_str(paragraph);
        out.push('\n');
    }
    out
}

/// File name used when exporting without an explicit path, e.g. `dQw4w9WgXcQ.txt`.
pub fn default_export_name(result: &TranscriptResult, format: OutputFormat) -> String {
    format!("{}.{}", result.video_id, format.extension())
}

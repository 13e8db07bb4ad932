//! Command results rendered as text or JSON.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::sniff::Detection;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// A result that can be shown as one line of text.
pub trait Report: Serialize {
    fn text(&self) -> String;
}

/// Image detection result for one file.
#[derive(Debug, Serialize)]
pub struct SniffReport {
    pub path: PathBuf,
    pub image: bool,
    #[serde(flatten)]
    pub detection: Detection,
}

impl Report for SniffReport {
    fn text(&self) -> String {
        let verdict = if self.image { "image" } else { "not an image" };
        let how = match self.detection {
            Detection::Extension { .. } => "by extension".to_string(),
            Detection::Content {
                format: Some(format),
            } => format!("{}, by content", format),
            Detection::Content { format: None } => "by content".to_string(),
            Detection::Undetermined => "undetermined".to_string(),
        };
        format!("{}: {} ({})", self.path.display(), verdict, how)
    }
}

/// Disk key for one input string.
#[derive(Debug, Serialize)]
pub struct HashReport {
    pub key: String,
    pub hash: String,
    /// False when the string-hash fallback was used.
    pub digest: bool,
}

impl Report for HashReport {
    fn text(&self) -> String {
        format!("{}  {}", self.hash, self.key)
    }
}

/// Total size of one path.
#[derive(Debug, Serialize)]
pub struct SizeReport {
    pub path: PathBuf,
    pub bytes: u64,
}

impl Report for SizeReport {
    fn text(&self) -> String {
        format!(
            "{}\t{} ({} bytes)",
            self.path.display(),
            format_bytes(self.bytes),
            self.bytes
        )
    }
}

/// A readable external storage root.
#[derive(Debug, Serialize)]
pub struct StorageReport {
    pub root: PathBuf,
}

impl Report for StorageReport {
    fn text(&self) -> String {
        self.root.display().to_string()
    }
}

/// Sanitized filename for one input.
#[derive(Debug, Serialize)]
pub struct SanitizeReport {
    pub input: String,
    pub filename: String,
}

impl Report for SanitizeReport {
    fn text(&self) -> String {
        self.filename.clone()
    }
}

/// Render reports in the requested format.
pub fn render<T: Report>(reports: &[T], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(reports)?),
        OutputFormat::Text => Ok(reports
            .iter()
            .map(Report::text)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Render reports to stdout.
pub fn print_reports<T: Report>(reports: &[T], format: OutputFormat) -> Result<()> {
    let rendered = render(reports, format)?;
    if !rendered.is_empty() {
        println!("{}", rendered);
    }
    Ok(())
}

/// Human-readable byte count using binary units.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

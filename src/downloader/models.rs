// Common data models for one download session

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::errors::DownloadError;

/// One parsed row of the stream listing: an opaque format code plus the
/// integer the selector orders by (pixel width for video, kbps for audio).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatCandidate {
    pub code: String,
    pub metric: u32,
}

impl FormatCandidate {
    pub fn new(code: impl Into<String>, metric: u32) -> Self {
        Self {
            code: code.into(),
            metric,
        }
    }
}

/// Format selector string handed back to the external tool. Opaque to this
/// crate: a `video+audio` pair, a single code, or a named alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSpecifier(String);

impl FormatSpecifier {
    /// Alias meaning "best available of each, let the tool choose".
    pub const FALLBACK: &'static str = "bestvideo+bestaudio";

    pub fn pair(video_code: &str, audio_code: &str) -> Self {
        Self(format!("{}+{}", video_code, audio_code))
    }

    pub fn single(code: &str) -> Self {
        Self(code.to_string())
    }

    pub fn fallback() -> Self {
        Self(Self::FALLBACK.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormatSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Two-option download menu, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    BestQuality,
    CustomCode,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Result<Self, DownloadError> {
        match input.trim() {
            "1" => Ok(Self::BestQuality),
            "2" => Ok(Self::CustomCode),
            other => Err(DownloadError::InvalidSelection(other.to_string())),
        }
    }
}

/// How the session picks a format once the menu is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    /// Auto-select the highest-width video + highest-bitrate audio
    BestQuality,
    /// A code the user typed, taken verbatim (legacy sentinel `all` maps
    /// to the fallback alias)
    Custom(String),
}

/// Result of a finished download. The filename is scraped from the tool's
/// output and is cosmetic only; `None` means no marker matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub filename: Option<String>,
}

impl DownloadOutcome {
    pub fn display_name(&self) -> &str {
        self.filename.as_deref().unwrap_or("Unknown")
    }
}

/// Download invocation knobs
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Where downloaded media lands; created lazily
    pub output_dir: PathBuf,
    /// Container passed to `--merge-output-format`
    pub merge_format: String,
    /// Re-encode arguments passed to `--postprocessor-args`
    pub postprocessor_args: String,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("videos"),
            merge_format: "mp4".to_string(),
            postprocessor_args: "-c:v libx264 -c:a aac".to_string(),
        }
    }
}

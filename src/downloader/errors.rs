// Error types for the download session

use std::fmt;
use std::io;

/// Which half of a video+audio pair the selector failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Video,
    Audio,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Audio => write!(f, "audio"),
        }
    }
}

#[derive(Debug)]
pub enum DownloadError {
    /// The external tool could not be found or spawned
    ToolNotFound(String),

    /// The external tool exited non-zero
    ExternalTool { command: String, stderr: String },

    /// The stream listing held no usable candidates of this kind
    NoSuitableFormat(StreamKind),

    /// User supplied an unrecognized menu choice
    InvalidSelection(String),

    /// Filesystem fault (directories, log file, terminal)
    Io(io::Error),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToolNotFound(tool) => write!(f, "Tool not found: {}", tool),
            Self::ExternalTool { command, stderr } => {
                write!(f, "External tool failed ({}): {}", command, stderr.trim())
            }
            Self::NoSuitableFormat(kind) => {
                write!(f, "No suitable {} format in the listing", kind)
            }
            Self::InvalidSelection(choice) => write!(f, "Invalid selection: {}", choice),
            Self::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for DownloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DownloadError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl DownloadError {
    /// Classify a spawn failure. A missing binary shows up as `NotFound`
    /// from the OS, everything else stays a generic tool failure.
    pub fn spawn_failure(program: &str, err: &io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::ToolNotFound(program.to_string())
        } else {
            Self::ExternalTool {
                command: program.to_string(),
                stderr: err.to_string(),
            }
        }
    }
}

// Session configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "ytfetch.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Explicit path to the download tool; discovery runs when unset
    pub tool_path: Option<String>,

    /// Where downloaded media lands
    pub download_dir: PathBuf,

    /// Where per-run log files land
    pub logs_dir: PathBuf,

    /// Container passed to `--merge-output-format`
    pub merge_format: String,

    /// Re-encode arguments passed to `--postprocessor-args`
    pub postprocessor_args: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tool_path: None,
            download_dir: PathBuf::from("videos"),
            logs_dir: PathBuf::from("logs"),
            merge_format: "mp4".to_string(),
            postprocessor_args: "-c:v libx264 -c:a aac".to_string(),
        }
    }
}

impl AppConfig {
    /// Load `ytfetch.json` from the working directory. A missing file is
    /// normal and yields defaults; a malformed one is reported and ignored.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(config) => config,
                Err(err) => {
                    warn!("Ignoring malformed {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

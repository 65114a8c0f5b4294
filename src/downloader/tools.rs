// External tool discovery

use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Binary name used when nothing better is found.
pub const DEFAULT_TOOL: &str = "yt-dlp";

/// Environment override for the tool path, checked after the config file.
pub const TOOL_ENV_VAR: &str = "YTFETCH_YTDLP";

/// Resolve the yt-dlp binary for this session.
///
/// Order: configured path, `YTFETCH_YTDLP`, common install locations,
/// `which` on PATH, then the bare name as a last resort.
pub fn resolve_tool(configured: Option<&str>) -> String {
    if let Some(path) = configured {
        debug!("Using configured tool path: {}", path);
        return path.to_string();
    }

    if let Ok(path) = std::env::var(TOOL_ENV_VAR) {
        if !path.trim().is_empty() {
            debug!("Using {} override: {}", TOOL_ENV_VAR, path);
            return path;
        }
    }

    let common_paths = [
        "/opt/homebrew/bin/yt-dlp", // Homebrew on Apple Silicon
        "/usr/local/bin/yt-dlp",    // Homebrew on Intel Mac
        "/usr/bin/yt-dlp",          // System installation
    ];

    for path in common_paths {
        if Path::new(path).exists() {
            return path.to_string();
        }
    }

    // pip --user installs land here
    if let Some(home) = dirs::home_dir() {
        let local = home.join(".local").join("bin").join(DEFAULT_TOOL);
        if local.exists() {
            return local.to_string_lossy().into_owned();
        }
    }

    if let Ok(output) = Command::new("which").arg(DEFAULT_TOOL).output() {
        if output.status.success() {
            let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !path.is_empty() {
                return path;
            }
        }
    }

    DEFAULT_TOOL.to_string()
}

/// Probe availability with `--version`.
pub fn tool_available(tool: &str) -> bool {
    match Command::new(tool).arg("--version").output() {
        Ok(out) => out.status.success(),
        Err(_) => false,
    }
}

/// Version string for the session log, if the tool answers.
pub fn tool_version(tool: &str) -> Option<String> {
    match Command::new(tool).arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            (!version.is_empty()).then_some(version)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_path_wins() {
        let resolved = resolve_tool(Some("/custom/bin/yt-dlp"));
        assert_eq!(resolved, "/custom/bin/yt-dlp");
    }

    #[test]
    fn test_resolve_always_yields_something() {
        // Whatever the machine looks like, resolution never comes back empty
        let resolved = resolve_tool(None);
        assert!(!resolved.is_empty());
    }

    #[test]
    fn test_tool_available_missing_binary() {
        assert!(!tool_available("/definitely/not/a/real/binary"));
    }

    #[test]
    fn test_tool_version_missing_binary() {
        assert!(tool_version("/definitely/not/a/real/binary").is_none());
    }
}

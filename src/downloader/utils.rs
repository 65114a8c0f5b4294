// Helper functions for backend implementations

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error};

use super::errors::DownloadError;

/// Captured result of one external invocation.
#[derive(Debug)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Render the command line for logs and error payloads.
pub fn render_command(program: &str, args: &[String]) -> String {
    let mut line = String::from(program);
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Run the tool to completion and capture both streams.
///
/// No timeout and no retries: a hung tool hangs the session until the
/// process is killed from outside.
pub async fn run_captured(program: &str, args: &[String]) -> Result<CapturedOutput, DownloadError> {
    let command_line = render_command(program, args);
    debug!("Invoking: {}", command_line);

    let output = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| DownloadError::spawn_failure(program, &e))?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        error!("Command failed ({}): {}", command_line, stderr.trim());
        return Err(DownloadError::ExternalTool {
            command: command_line,
            stderr,
        });
    }

    debug!("Command succeeded: {}", command_line);
    Ok(CapturedOutput { stdout, stderr })
}

/// Create a directory if it does not exist yet. Safe to call repeatedly.
pub fn ensure_dir(path: &Path) -> Result<(), DownloadError> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn fake_tool(dir: &Path, script: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-tool");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_captured_returns_stdout_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_tool(dir.path(), "printf 'line one\\nline two\\n'");

        let captured = run_captured(tool.to_str().unwrap(), &[]).await.unwrap();
        assert_eq!(captured.stdout, "line one\nline two\n");
        assert_eq!(captured.stderr, "");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_captured_nonzero_exit_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_tool(dir.path(), "echo 'ERROR: boom' >&2; exit 3");

        let args = vec!["-F".to_string(), "url".to_string()];
        let err = run_captured(tool.to_str().unwrap(), &args)
            .await
            .unwrap_err();

        match err {
            DownloadError::ExternalTool { command, stderr } => {
                assert!(command.ends_with("fake-tool -F url"));
                assert!(stderr.contains("ERROR: boom"));
            }
            other => panic!("expected ExternalTool, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_captured_missing_binary() {
        let err = run_captured("/definitely/not/a/real/binary", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::ToolNotFound(_)));
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("videos");

        ensure_dir(&target).unwrap();
        std::fs::write(target.join("existing.mp4"), b"media").unwrap();
        ensure_dir(&target).unwrap();

        assert!(target.join("existing.mp4").exists());
    }

    #[test]
    fn test_render_command() {
        let args = vec!["-F".to_string(), "https://example.com/v".to_string()];
        assert_eq!(
            render_command("yt-dlp", &args),
            "yt-dlp -F https://example.com/v"
        );
    }
}

// yt-dlp backend: listing fetch and download invocation

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info};

use crate::downloader::errors::DownloadError;
use crate::downloader::models::{DownloadOptions, DownloadOutcome, FormatSpecifier};
use crate::downloader::traits::DownloaderBackend;
use crate::downloader::utils::{ensure_dir, run_captured};

lazy_static! {
    static ref MERGE_RE: Regex =
        Regex::new(r#"\[Merger\]\s+Merging formats into "(.+?)""#).unwrap();
    static ref DEST_RE: Regex = Regex::new(r"\[download\]\s+Destination:\s+(.+)").unwrap();
    static ref ALREADY_RE: Regex =
        Regex::new(r"\[download\]\s+(.+?) has already been downloaded").unwrap();
}

/// Pull the output filename out of the tool's stdout. Best effort and
/// cosmetic only. A fresh merged download reports a merger target, a
/// single-stream download a destination line, and a repeat run the
/// "already downloaded" notice; markers are checked in that order.
pub fn extract_filename(stdout: &str) -> Option<String> {
    if let Some(caps) = MERGE_RE.captures(stdout) {
        return Some(caps[1].trim().to_string());
    }
    if let Some(caps) = DEST_RE.captures(stdout) {
        return Some(caps[1].trim().to_string());
    }
    if let Some(caps) = ALREADY_RE.captures(stdout) {
        return Some(caps[1].trim().to_string());
    }
    None
}

pub struct YtDlpBackend {
    tool: String,
    options: DownloadOptions,
}

impl YtDlpBackend {
    pub fn new(tool: String, options: DownloadOptions) -> Self {
        Self { tool, options }
    }

    /// `<dir>/%(title)s.%(ext)s`; the tool substitutes title and extension
    fn output_template(&self) -> String {
        format!("{}/%(title)s.%(ext)s", self.options.output_dir.display())
    }
}

#[async_trait]
impl DownloaderBackend for YtDlpBackend {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn fetch_listing(&self, url: &str) -> Result<String, DownloadError> {
        let args = vec!["-F".to_string(), url.to_string()];

        match run_captured(&self.tool, &args).await {
            Ok(captured) => {
                info!("Fetched stream listing:\n{}", captured.stdout);
                Ok(captured.stdout)
            }
            Err(err) => {
                error!("Listing fetch failed: {}", err);
                Err(err)
            }
        }
    }

    async fn download(
        &self,
        url: &str,
        spec: &FormatSpecifier,
    ) -> Result<DownloadOutcome, DownloadError> {
        ensure_dir(&self.options.output_dir)?;

        let args = vec![
            "-f".to_string(),
            spec.as_str().to_string(),
            "-o".to_string(),
            self.output_template(),
            "--merge-output-format".to_string(),
            self.options.merge_format.clone(),
            "--postprocessor-args".to_string(),
            self.options.postprocessor_args.clone(),
            url.to_string(),
        ];

        match run_captured(&self.tool, &args).await {
            Ok(captured) => {
                info!("Download finished:\n{}", captured.stdout);
                Ok(DownloadOutcome {
                    filename: extract_filename(&captured.stdout),
                })
            }
            Err(err) => {
                error!("Download failed: {}", err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_already_downloaded() {
        let stdout = "[download] videos/Some Clip.mp4 has already been downloaded\n";
        assert_eq!(
            extract_filename(stdout).as_deref(),
            Some("videos/Some Clip.mp4")
        );
    }

    #[test]
    fn test_extract_prefers_merger_target() {
        let stdout = "\
[download] Destination: videos/Some Clip.f137.mp4
[download] 100% of 45.01MiB
[download] Destination: videos/Some Clip.f140.m4a
[Merger] Merging formats into \"videos/Some Clip.mp4\"
";
        assert_eq!(
            extract_filename(stdout).as_deref(),
            Some("videos/Some Clip.mp4")
        );
    }

    #[test]
    fn test_extract_destination_without_merge() {
        let stdout = "[download] Destination: videos/Single.mp4\n[download] 100%\n";
        assert_eq!(extract_filename(stdout).as_deref(), Some("videos/Single.mp4"));
    }

    #[test]
    fn test_extract_unmatched_output_is_none() {
        assert_eq!(extract_filename("random tool chatter\n"), None);
        assert_eq!(extract_filename(""), None);
    }

    #[cfg(unix)]
    mod with_fake_tool {
        use super::*;
        use std::path::Path;

        fn fake_tool(dir: &Path, script: &str) -> std::path::PathBuf {
            use std::os::unix::fs::PermissionsExt;

            let path = dir.join("fake-ytdlp");
            std::fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
            let mut perms = std::fs::metadata(&path).unwrap().permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&path, perms).unwrap();
            path
        }

        #[tokio::test]
        async fn test_download_reports_extracted_filename() {
            let dir = tempfile::tempdir().unwrap();
            let tool = fake_tool(
                dir.path(),
                "echo '[download] Destination: videos/Clip.mp4'",
            );

            let options = DownloadOptions {
                output_dir: dir.path().join("videos"),
                ..DownloadOptions::default()
            };
            let backend = YtDlpBackend::new(tool.to_string_lossy().into_owned(), options);

            let outcome = backend
                .download("https://example.com/v", &FormatSpecifier::single("18"))
                .await
                .unwrap();
            assert_eq!(outcome.display_name(), "videos/Clip.mp4");
            // destination directory was created up front
            assert!(dir.path().join("videos").is_dir());
        }

        #[tokio::test]
        async fn test_download_failure_propagates_stderr() {
            let dir = tempfile::tempdir().unwrap();
            let tool = fake_tool(dir.path(), "echo 'ERROR: no formats' >&2; exit 1");

            let options = DownloadOptions {
                output_dir: dir.path().join("videos"),
                ..DownloadOptions::default()
            };
            let backend = YtDlpBackend::new(tool.to_string_lossy().into_owned(), options);

            let err = backend
                .download("https://example.com/v", &FormatSpecifier::fallback())
                .await
                .unwrap_err();
            match err {
                DownloadError::ExternalTool { stderr, .. } => {
                    assert!(stderr.contains("no formats"))
                }
                other => panic!("expected ExternalTool, got {:?}", other),
            }
        }

        #[tokio::test]
        async fn test_fetch_listing_returns_stdout() {
            let dir = tempfile::tempdir().unwrap();
            let tool = fake_tool(
                dir.path(),
                "printf '137  mp4  1920x1080\\n140  audio only  128k\\n'",
            );

            let backend = YtDlpBackend::new(
                tool.to_string_lossy().into_owned(),
                DownloadOptions::default(),
            );
            let listing = backend.fetch_listing("https://example.com/v").await.unwrap();
            assert_eq!(listing, "137  mp4  1920x1080\n140  audio only  128k\n");
        }
    }
}

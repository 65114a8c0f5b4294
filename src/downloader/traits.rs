// Downloader backend trait definition

use async_trait::async_trait;

use super::errors::DownloadError;
use super::models::{DownloadOutcome, FormatSpecifier};

/// One external download tool, as seen by the session orchestrator.
#[async_trait]
pub trait DownloaderBackend: Send + Sync {
    /// Name of the backend (for logging)
    fn name(&self) -> &'static str;

    /// Fetch the raw stream listing for a URL.
    async fn fetch_listing(&self, url: &str) -> Result<String, DownloadError>;

    /// Download `spec` and report the resolved filename (best effort).
    async fn download(
        &self,
        url: &str,
        spec: &FormatSpecifier,
    ) -> Result<DownloadOutcome, DownloadError>;
}

// Single-pass session sequencing: fetch -> present -> select -> download

use tracing::{info, warn};

use super::errors::DownloadError;
use super::format_selector;
use super::models::{DownloadOutcome, FormatSpecifier, SelectionMode};
use super::traits::DownloaderBackend;

/// Drives one download session against a backend. No retry loop and no
/// resumption: each step runs once and the session ends.
pub struct Session {
    backend: Box<dyn DownloaderBackend>,
}

impl Session {
    pub fn new(backend: Box<dyn DownloaderBackend>) -> Self {
        Self { backend }
    }

    pub async fn fetch_listing(&self, url: &str) -> Result<String, DownloadError> {
        info!("Fetching stream listing via {}", self.backend.name());
        self.backend.fetch_listing(url).await
    }

    /// Turn the user's mode choice into a concrete specifier.
    ///
    /// A listing with no usable candidates is not fatal: the session falls
    /// back to the tool's own best-available alias. The legacy `all`
    /// sentinel on a custom code maps to the same alias.
    pub fn resolve_specifier(&self, listing: &str, mode: &SelectionMode) -> FormatSpecifier {
        match mode {
            SelectionMode::BestQuality => match format_selector::select_best(listing) {
                Ok(spec) => {
                    info!("Auto-selected format: {}", spec);
                    spec
                }
                Err(err) => {
                    warn!("{}; falling back to {}", err, FormatSpecifier::FALLBACK);
                    println!(
                        "Could not pick a format from the listing; \
                         letting the tool choose the best available."
                    );
                    FormatSpecifier::fallback()
                }
            },
            SelectionMode::Custom(code) if code.eq_ignore_ascii_case("all") => {
                info!("Legacy 'all' sentinel; using {}", FormatSpecifier::FALLBACK);
                FormatSpecifier::fallback()
            }
            SelectionMode::Custom(code) => {
                info!("User selected format code: {}", code);
                FormatSpecifier::single(code)
            }
        }
    }

    pub async fn download(
        &self,
        url: &str,
        spec: &FormatSpecifier,
    ) -> Result<DownloadOutcome, DownloadError> {
        info!("Starting download with format {}", spec);
        self.backend.download(url, spec).await
    }
}

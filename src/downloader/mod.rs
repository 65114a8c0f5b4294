// Downloader module - external-tool orchestration layer

pub mod backends;
pub mod errors;
pub mod format_selector;
pub mod models;
pub mod orchestrator;
pub mod tools;
pub mod traits;
pub mod utils;

pub use errors::{DownloadError, StreamKind};
pub use models::{
    DownloadOptions, DownloadOutcome, FormatCandidate, FormatSpecifier, MenuChoice, SelectionMode,
};
pub use orchestrator::Session;
pub use traits::DownloaderBackend;

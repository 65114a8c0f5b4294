//! Interactive front-end for an external video-download tool.
//!
//! Lists the available stream formats for a URL (`yt-dlp -F`), lets the
//! user pick a format code or auto-selects the widest video plus the
//! highest-bitrate audio, then invokes the download. All networking and
//! media handling is delegated to the tool; this crate is orchestration,
//! output scraping, and reporting.
//!
//! One run is one session: a single fetch -> present -> select -> download
//! pass with a per-run log file under the logs directory. The process
//! exits 0 even on logical failure; scripts that need a real exit status
//! should check the log instead.

pub mod config;
pub mod downloader;
pub mod logging;

// Best-format selection over the raw `-F` stream listing
//
// The listing is a human-readable table with no stability contract, so the
// scraper matches only the columns it needs (an integer format code, a
// known video container plus a WIDTHxHEIGHT token, or an "audio only"
// marker plus a kbps token) and ignores every other column and row.

use lazy_static::lazy_static;
use regex::Regex;

use super::errors::{DownloadError, StreamKind};
use super::models::{FormatCandidate, FormatSpecifier};

lazy_static! {
    // "137  mp4  1920x1080 ...": code, known video container, resolution.
    // The capture is the WIDTH; selection orders by width, not height.
    static ref VIDEO_RE: Regex =
        Regex::new(r"(?m)^\s*(\d+)\s+(?:mp4|webm|mkv|flv|3gp)\s+.*?(\d+)x\d+").unwrap();

    // "140  m4a  audio only ... 128k"; the container column is missing in
    // some tool versions, so it is optional here.
    static ref AUDIO_RE: Regex =
        Regex::new(r"(?m)^\s*(\d+)\s+(?:\S+\s+)?audio only.*?\b(\d+)k\b").unwrap();
}

/// Video rows of the listing, metric = pixel width.
pub fn video_candidates(listing: &str) -> Vec<FormatCandidate> {
    VIDEO_RE
        .captures_iter(listing)
        .filter_map(|caps| {
            let code = caps.get(1)?.as_str();
            let width: u32 = caps.get(2)?.as_str().parse().ok()?;
            Some(FormatCandidate::new(code, width))
        })
        .collect()
}

/// Audio-only rows of the listing, metric = bitrate in kbps.
pub fn audio_candidates(listing: &str) -> Vec<FormatCandidate> {
    AUDIO_RE
        .captures_iter(listing)
        .filter_map(|caps| {
            let code = caps.get(1)?.as_str();
            let bitrate: u32 = caps.get(2)?.as_str().parse().ok()?;
            Some(FormatCandidate::new(code, bitrate))
        })
        .collect()
}

/// Pick the widest video and the highest-bitrate audio stream.
///
/// Ties are broken arbitrarily; callers must not rely on the order among
/// equal candidates. The video side is checked before the audio side.
pub fn select_best(listing: &str) -> Result<FormatSpecifier, DownloadError> {
    let videos = video_candidates(listing);
    let best_video = videos
        .iter()
        .max_by_key(|c| c.metric)
        .ok_or(DownloadError::NoSuitableFormat(StreamKind::Video))?;

    let audios = audio_candidates(listing);
    let best_audio = audios
        .iter()
        .max_by_key(|c| c.metric)
        .ok_or(DownloadError::NoSuitableFormat(StreamKind::Audio))?;

    Ok(FormatSpecifier::pair(&best_video.code, &best_audio.code))
}

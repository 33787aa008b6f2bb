//! Removal of in-theatre camera recordings.

use super::types::QualityTable;

/// Keywords that mark a camera or telesync release in a magnet link.
///
/// Matching is a plain substring test, so short keywords also hit
/// unrelated tags: `TS` matches the `YTS` provider tag in `dn=` names.
/// Pass a narrower list through `TorrentSelector::with_cam_keywords` when
/// that matters.
pub const DEFAULT_CAM_KEYWORDS: &[&str] = &["CAM", "HDCAM", "TS", "TC", "TELESYNC", "HDTS"];

/// Whether `url` contains any of `keywords` (case-sensitive).
pub fn is_cam_release<S: AsRef<str>>(url: &str, keywords: &[S]) -> bool {
    keywords.iter().any(|keyword| url.contains(keyword.as_ref()))
}

/// Drop every torrent whose url matches a camera keyword.
///
/// Returns `None` when nothing is left, including for an empty input.
pub fn filter_cam_releases<S: AsRef<str>>(
    table: &QualityTable,
    keywords: &[S],
) -> Option<QualityTable> {
    let kept: QualityTable = table
        .iter()
        .filter(|(_, torrent)| !is_cam_release(&torrent.url, keywords))
        .map(|(label, torrent)| (label, torrent.clone()))
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(kept)
    }
}

//! Torrent selection.
//!
//! The API lists every torrent of a title as a table keyed by quality label,
//! optionally nested under a language code. This module decodes that shape,
//! resolves the preferred language, picks the best torrent for a set of
//! thresholds, and filters out camera recordings.

mod cam;
mod language;
mod selector;
mod types;

pub use cam::{filter_cam_releases, is_cam_release, DEFAULT_CAM_KEYWORDS};
pub use language::resolve_language;
pub use selector::{parse_quality_label, select_best, SelectionPolicy, TorrentSelector};
pub use types::{BestTorrent, QualityTable, TorrentDescriptor, TorrentTable, DEFAULT_QUALITY_LABEL};

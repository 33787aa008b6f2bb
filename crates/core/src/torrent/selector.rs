//! Best torrent selection by resolution and swarm thresholds.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;

use super::cam::filter_cam_releases;
use super::language::resolve_language;
use super::types::{BestTorrent, QualityTable, TorrentDescriptor, TorrentTable, DEFAULT_QUALITY_LABEL};

/// Thresholds a torrent must meet to be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPolicy {
    /// Minimum number of seeders.
    pub min_seeds: u32,
    /// Minimum number of peers.
    pub min_peers: u32,
    /// Minimum resolution (e.g. 1080). `None` accepts any resolution.
    pub min_quality: Option<u32>,
    /// Fall back to the provider's default torrent when nothing qualifies.
    pub revert_to_default: bool,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            min_seeds: 0,
            min_peers: 0,
            min_quality: None,
            revert_to_default: false,
        }
    }
}

impl SelectionPolicy {
    pub fn with_min_seeds(mut self, min_seeds: u32) -> Self {
        self.min_seeds = min_seeds;
        self
    }

    pub fn with_min_peers(mut self, min_peers: u32) -> Self {
        self.min_peers = min_peers;
        self
    }

    pub fn with_min_quality(mut self, min_quality: Option<u32>) -> Self {
        self.min_quality = min_quality;
        self
    }

    pub fn with_revert_to_default(mut self, revert_to_default: bool) -> Self {
        self.revert_to_default = revert_to_default;
        self
    }

    /// Whether a torrent at `quality` meets every threshold.
    pub fn accepts(&self, quality: u32, torrent: &TorrentDescriptor) -> bool {
        torrent.seeds >= self.min_seeds
            && torrent.peers >= self.min_peers
            && self.min_quality.map_or(true, |min| quality >= min)
    }
}

/// Parse a quality label such as `"720p"` into its resolution.
///
/// Returns `None` for labels that are not a plain number with an optional
/// trailing `p` (e.g. `"3D"`).
pub fn parse_quality_label(label: &str) -> Option<u32> {
    let digits = label
        .strip_suffix(|c: char| c == 'p' || c == 'P')
        .unwrap_or(label);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    digits.parse().ok()
}

/// Pick the highest resolution torrent in `table` that satisfies `policy`.
///
/// The default entry (`"0"`) never competes on resolution; it is only
/// returned, with quality 0, when nothing qualifies and the policy asks to
/// revert. Equal resolutions keep the first entry in document order.
pub fn select_best(table: &QualityTable, policy: &SelectionPolicy) -> Option<BestTorrent> {
    let mut best: Option<(u32, &TorrentDescriptor)> = None;

    for (label, torrent) in table.iter() {
        if label == DEFAULT_QUALITY_LABEL {
            continue;
        }

        let Some(quality) = parse_quality_label(label) else {
            debug!(label, "Skipping unrecognised quality label");
            continue;
        };

        if !policy.accepts(quality, torrent) {
            continue;
        }

        if best.map_or(true, |(best_quality, _)| quality > best_quality) {
            best = Some((quality, torrent));
        }
    }

    if let Some((quality, torrent)) = best {
        debug!(quality, seeds = torrent.seeds, peers = torrent.peers, "Selected torrent");
        return Some(BestTorrent {
            quality,
            torrent: torrent.clone(),
        });
    }

    if !policy.revert_to_default {
        return None;
    }

    info!("No torrents qualified, reverting to default torrent");
    table.default_torrent().map(|torrent| BestTorrent {
        quality: 0,
        torrent: torrent.clone(),
    })
}

/// Language-aware torrent selection using a fixed configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentSelector {
    language: String,
    min_seeds: u32,
    min_peers: u32,
    min_quality: Option<u32>,
    cam_keywords: Vec<String>,
}

impl TorrentSelector {
    /// Create a selector for `language` with no thresholds and the default
    /// camera keywords.
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_lowercase(),
            min_seeds: 0,
            min_peers: 0,
            min_quality: None,
            cam_keywords: super::DEFAULT_CAM_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }

    /// Create a selector from client configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            language: config.language.to_lowercase(),
            min_seeds: config.min_seeds,
            min_peers: config.min_peers,
            min_quality: config.min_quality,
            cam_keywords: config.cam_keywords.clone(),
        }
    }

    pub fn with_thresholds(mut self, min_seeds: u32, min_peers: u32) -> Self {
        self.min_seeds = min_seeds;
        self.min_peers = min_peers;
        self
    }

    pub fn with_min_quality(mut self, min_quality: Option<u32>) -> Self {
        self.min_quality = min_quality;
        self
    }

    pub fn with_cam_keywords(mut self, keywords: Vec<String>) -> Self {
        self.cam_keywords = keywords;
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn cam_keywords(&self) -> &[String] {
        &self.cam_keywords
    }

    /// Selection policy built from the configured thresholds.
    pub fn policy(&self) -> SelectionPolicy {
        SelectionPolicy {
            min_seeds: self.min_seeds,
            min_peers: self.min_peers,
            min_quality: self.min_quality,
            revert_to_default: false,
        }
    }

    /// Quality table for the configured language.
    pub fn resolve_language<'a>(&self, table: &'a TorrentTable) -> &'a QualityTable {
        resolve_language(table, &self.language)
    }

    /// Resolve the language, then select with an explicit policy.
    pub fn select(&self, table: &TorrentTable, policy: &SelectionPolicy) -> Option<BestTorrent> {
        select_best(self.resolve_language(table), policy)
    }

    /// Best torrent at or above `min_quality` using the configured seed and
    /// peer thresholds.
    ///
    /// `None` falls back to the configured minimum quality.
    pub fn best_torrent(
        &self,
        table: &TorrentTable,
        min_quality: Option<u32>,
        revert_to_default: bool,
    ) -> Option<BestTorrent> {
        let min_quality = min_quality.or(self.min_quality);
        info!(min_quality = ?min_quality, "Getting best torrent");

        let policy = self
            .policy()
            .with_min_quality(min_quality)
            .with_revert_to_default(revert_to_default);

        self.select(table, &policy)
    }

    /// Torrents for the configured language without camera releases.
    ///
    /// Returns `None` when every torrent is a camera release.
    pub fn remove_cam_torrents(&self, table: &TorrentTable) -> Option<QualityTable> {
        info!("Removing camera filmed torrents");

        match filter_cam_releases(self.resolve_language(table), &self.cam_keywords) {
            Some(filtered) => {
                info!(count = filtered.len(), "Kept torrents not filmed by camera");
                Some(filtered)
            }
            None => {
                warn!("All torrents were camera filmed");
                None
            }
        }
    }
}

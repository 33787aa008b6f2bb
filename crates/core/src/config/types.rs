use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::torrent::DEFAULT_CAM_KEYWORDS;

/// Client configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL (e.g., "https://popcorn-time.ga")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Preferred torrent language code (lower-cased on load)
    #[serde(default = "default_language")]
    pub language: String,
    /// Minimum seeders for a torrent to be selected
    #[serde(default)]
    pub min_seeds: u32,
    /// Minimum peers for a torrent to be selected
    #[serde(default)]
    pub min_peers: u32,
    /// Default minimum resolution (default: 1080)
    #[serde(default = "default_min_quality")]
    pub min_quality: Option<u32>,
    /// Magnet link substrings that mark camera releases
    #[serde(default = "default_cam_keywords")]
    pub cam_keywords: Vec<String>,
    /// Logging verbosity
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            language: default_language(),
            min_seeds: 0,
            min_peers: 0,
            min_quality: default_min_quality(),
            cam_keywords: default_cam_keywords(),
            log_level: LogLevel::default(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_lowercase();
        self
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

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Lower-case the language code.
    pub(crate) fn normalized(mut self) -> Self {
        self.language = self.language.to_lowercase();
        self
    }
}

fn default_base_url() -> String {
    "https://popcorn-time.ga".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_min_quality() -> Option<u32> {
    Some(1080)
}

fn default_cam_keywords() -> Vec<String> {
    DEFAULT_CAM_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

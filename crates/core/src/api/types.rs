//! Types for Popcorn Time API responses.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::torrent::TorrentTable;

// ============================================================================
// Server
// ============================================================================

/// Response of `/status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerStatus {
    /// Source repository of the API server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    /// Server instance name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    /// Scraper state (e.g. "Idle").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "totalMovies", default, skip_serializing_if = "Option::is_none")]
    pub total_movies: Option<u64>,
    #[serde(rename = "totalShows", default, skip_serializing_if = "Option::is_none")]
    pub total_shows: Option<u64>,
    #[serde(rename = "totalAnimes", default, skip_serializing_if = "Option::is_none")]
    pub total_animes: Option<u64>,
    /// Last scrape, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
    /// Server uptime in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

/// Response of `/shows/stat` and `/movies/stat`, keyed by genre.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CatalogStats(pub Map<String, Value>);

/// Count of titles in one genre.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenreStat {
    /// Genre key as sent by the API (e.g. "action & adventure").
    pub key: String,
    /// Display title, when provided.
    pub title: Option<String>,
    pub count: u64,
}

impl CatalogStats {
    /// Number of titles in `genre`, if reported.
    pub fn count(&self, genre: &str) -> Option<u64> {
        self.0.get(genre).and_then(stat_count)
    }

    /// Every entry that carries a count, in key order.
    pub fn genres(&self) -> Vec<GenreStat> {
        self.0
            .iter()
            .filter_map(|(key, value)| {
                stat_count(value).map(|count| GenreStat {
                    key: key.clone(),
                    title: value
                        .get("title")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    count,
                })
            })
            .collect()
    }
}

fn stat_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::Object(fields) => fields.get("count").and_then(Value::as_u64),
        _ => None,
    }
}

// ============================================================================
// Shared
// ============================================================================

/// Artwork URLs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Images {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fanart: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

/// Audience rating.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rating {
    /// Rating out of 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watching: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loved: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hated: Option<u64>,
}

// ============================================================================
// Movies
// ============================================================================

/// A movie with its torrents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// Catalog ID (the IMDb ID, e.g. "tt0111161").
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    pub title: String,
    /// Release year.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    /// Runtime in minutes.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub runtime: Option<String>,
    /// Release date, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certification: Option<String>,
    /// Torrents keyed by language then quality.
    #[serde(default)]
    pub torrents: TorrentTable,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Images,
    #[serde(default)]
    pub rating: Rating,
}

// ============================================================================
// Shows
// ============================================================================

/// A show as listed on a catalog page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShowSummary {
    /// Catalog ID (the IMDb ID).
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub tvdb_id: Option<String>,
    pub title: String,
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_seasons: Option<u32>,
    #[serde(default)]
    pub images: Images,
    #[serde(default)]
    pub rating: Rating,
}

/// A show with its episodes, as returned by `/show/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Show {
    #[serde(flatten)]
    pub summary: ShowSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    /// Episode runtime in minutes.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub runtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_time: Option<String>,
    /// Airing status (e.g. "ended").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Last scrape, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<i64>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

impl Show {
    /// Catalog ID of the show.
    pub fn id(&self) -> &str {
        &self.summary.id
    }

    /// Find an episode by season and episode number.
    pub fn episode(&self, season: u32, episode: u32) -> Option<&Episode> {
        self.episodes
            .iter()
            .find(|e| e.season == season && e.episode == episode)
    }
}

/// A single episode with its torrents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Episode {
    pub season: u32,
    pub episode: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub tvdb_id: Option<String>,
    /// First air date, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_aired: Option<i64>,
    #[serde(default)]
    pub date_based: bool,
    /// Torrents keyed by quality.
    #[serde(default)]
    pub torrents: TorrentTable,
}

/// The API sends some identifiers and years as either strings or numbers.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

//! Torrent data model decoded from the API's `torrents` field.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Quality label the provider uses for its own default pick.
pub const DEFAULT_QUALITY_LABEL: &str = "0";

/// A single downloadable torrent variant.
///
/// Movies report swarm health as `seed`/`peer`, shows as `seeds`/`peers`.
/// Both spellings are accepted on decode; the plural wins when both are
/// present and a missing count decodes as 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "RawTorrentDescriptor")]
pub struct TorrentDescriptor {
    /// Magnet link.
    pub url: String,
    /// Number of seeders.
    pub seeds: u32,
    /// Number of peers.
    pub peers: u32,
    /// Size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Human readable size (e.g. "1.4 GB").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesize: Option<String>,
    /// Indexer the torrent was scraped from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl TorrentDescriptor {
    /// Create a descriptor with only the fields selection cares about.
    pub fn new(url: impl Into<String>, seeds: u32, peers: u32) -> Self {
        Self {
            url: url.into(),
            seeds,
            peers,
            size: None,
            filesize: None,
            provider: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTorrentDescriptor {
    url: String,
    seeds: Option<u32>,
    seed: Option<u32>,
    peers: Option<u32>,
    peer: Option<u32>,
    size: Option<u64>,
    filesize: Option<String>,
    provider: Option<String>,
}

impl From<RawTorrentDescriptor> for TorrentDescriptor {
    fn from(raw: RawTorrentDescriptor) -> Self {
        Self {
            url: raw.url,
            seeds: raw.seeds.or(raw.seed).unwrap_or(0),
            peers: raw.peers.or(raw.peer).unwrap_or(0),
            size: raw.size,
            filesize: raw.filesize,
            provider: raw.provider,
        }
    }
}

/// Quality label to torrent mapping, kept in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualityTable {
    entries: Vec<(String, TorrentDescriptor)>,
}

impl QualityTable {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a torrent under `label`.
    ///
    /// An existing label keeps its position and has its torrent replaced.
    pub fn insert(&mut self, label: impl Into<String>, torrent: TorrentDescriptor) {
        let label = label.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing = torrent,
            None => self.entries.push((label, torrent)),
        }
    }

    /// Look up the torrent stored under `label`.
    pub fn get(&self, label: &str) -> Option<&TorrentDescriptor> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, torrent)| torrent)
    }

    /// The provider's default torrent (label `"0"`), if any.
    pub fn default_torrent(&self) -> Option<&TorrentDescriptor> {
        self.get(DEFAULT_QUALITY_LABEL)
    }

    /// Iterate over `(label, torrent)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TorrentDescriptor)> {
        self.entries.iter().map(|(l, t)| (l.as_str(), t))
    }

    /// Quality labels in document order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, TorrentDescriptor)> for QualityTable {
    fn from_iter<I: IntoIterator<Item = (K, TorrentDescriptor)>>(iter: I) -> Self {
        let mut table = QualityTable::new();
        for (label, torrent) in iter {
            table.insert(label, torrent);
        }
        table
    }
}

impl IntoIterator for QualityTable {
    type Item = (String, TorrentDescriptor);
    type IntoIter = std::vec::IntoIter<(String, TorrentDescriptor)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for QualityTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, torrent) in &self.entries {
            map.serialize_entry(label, torrent)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for QualityTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = deserializer.deserialize_map(OrderedMapVisitor::<TorrentDescriptor>::new())?;
        Ok(entries.into_iter().collect())
    }
}

/// The `torrents` value as sent by the API.
///
/// Movies nest quality tables under a language code
/// (`{"en": {"720p": {..}}}`), episodes use a quality table directly
/// (`{"0": {..}, "480p": {..}}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TorrentTable {
    /// Quality label to torrent.
    Flat(QualityTable),
    /// Lower-cased language code to quality table, in document order.
    ByLanguage(Vec<(String, QualityTable)>),
}

impl TorrentTable {
    /// Language codes available in this table (empty for flat tables).
    pub fn languages(&self) -> Vec<&str> {
        match self {
            TorrentTable::Flat(_) => Vec::new(),
            TorrentTable::ByLanguage(languages) => {
                languages.iter().map(|(code, _)| code.as_str()).collect()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TorrentTable::Flat(table) => table.is_empty(),
            TorrentTable::ByLanguage(languages) => languages.is_empty(),
        }
    }
}

impl Default for TorrentTable {
    fn default() -> Self {
        TorrentTable::Flat(QualityTable::new())
    }
}

impl From<QualityTable> for TorrentTable {
    fn from(table: QualityTable) -> Self {
        TorrentTable::Flat(table)
    }
}

/// Resolution labels always carry a digit ("720p", "0"); language codes never do.
pub(crate) fn is_quality_key(key: &str) -> bool {
    key.chars().any(|c| c.is_ascii_digit())
}

impl Serialize for TorrentTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TorrentTable::Flat(table) => table.serialize(serializer),
            TorrentTable::ByLanguage(languages) => {
                let mut map = serializer.serialize_map(Some(languages.len()))?;
                for (code, table) in languages {
                    map.serialize_entry(code, table)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for TorrentTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = deserializer.deserialize_any(OrderedMapVisitor::<Value>::new())?;

        let flat = match entries.first() {
            Some((key, _)) => is_quality_key(key),
            None => true,
        };

        if flat {
            let table = entries
                .into_iter()
                .map(|(label, value)| {
                    TorrentDescriptor::deserialize(value)
                        .map(|torrent| (label, torrent))
                        .map_err(de::Error::custom)
                })
                .collect::<Result<QualityTable, D::Error>>()?;
            return Ok(TorrentTable::Flat(table));
        }

        let languages = entries
            .into_iter()
            .map(|(code, value)| {
                QualityTable::deserialize(value)
                    .map(|table| (code.to_lowercase(), table))
                    .map_err(de::Error::custom)
            })
            .collect::<Result<Vec<_>, D::Error>>()?;
        Ok(TorrentTable::ByLanguage(languages))
    }
}

/// Collects a JSON object into `(key, value)` pairs without reordering.
struct OrderedMapVisitor<V> {
    marker: std::marker::PhantomData<V>,
}

impl<V> OrderedMapVisitor<V> {
    fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = Vec<(String, V)>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map keyed by quality label or language code")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            entries.push((key, value));
        }
        Ok(entries)
    }

    // Some catalog entries carry `"torrents": null`.
    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }
}

/// Outcome of a successful selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BestTorrent {
    /// Resolution of the chosen torrent; 0 when the provider default was used.
    pub quality: u32,
    /// The chosen torrent.
    pub torrent: TorrentDescriptor,
}

//! Testing utilities and a mock implementation of the catalog API.
//!
//! # Example
//!
//! ```rust,ignore
//! use popcorn_core::testing::{fixtures, MockPopcornApi};
//!
//! let api = MockPopcornApi::new();
//! api.add_movie(fixtures::movie("tt0111161", "The Shawshank Redemption",
//!     fixtures::language_table("en", &[("720p", 100, 20)]))).await;
//!
//! let movie = api.movie("tt0111161").await?;
//! ```

mod mock_popcorn_api;

pub use mock_popcorn_api::{MockPopcornApi, RecordedApiCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::api::{Episode, Images, Movie, Rating, Show, ShowSummary};
    use crate::torrent::{QualityTable, TorrentDescriptor, TorrentTable};

    /// Create a torrent whose magnet link mentions `label`.
    pub fn torrent(label: &str, seeds: u32, peers: u32) -> TorrentDescriptor {
        TorrentDescriptor::new(
            format!("magnet:?xt=urn:btih:{}&dn=Fixture.{}.WEBRip", label, label),
            seeds,
            peers,
        )
    }

    /// Create a quality table from `(label, seeds, peers)` entries.
    pub fn quality_table(entries: &[(&str, u32, u32)]) -> QualityTable {
        entries
            .iter()
            .map(|(label, seeds, peers)| (*label, torrent(label, *seeds, *peers)))
            .collect()
    }

    /// Create a flat (episode style) torrent table.
    pub fn flat_table(entries: &[(&str, u32, u32)]) -> TorrentTable {
        TorrentTable::Flat(quality_table(entries))
    }

    /// Create a single-language (movie style) torrent table.
    pub fn language_table(language: &str, entries: &[(&str, u32, u32)]) -> TorrentTable {
        TorrentTable::ByLanguage(vec![(language.to_lowercase(), quality_table(entries))])
    }

    /// Create a test movie.
    pub fn movie(id: &str, title: &str, torrents: TorrentTable) -> Movie {
        Movie {
            id: id.to_string(),
            imdb_id: Some(id.to_string()),
            title: title.to_string(),
            year: Some("2010".to_string()),
            synopsis: Some(format!("A movie about {}.", title.to_lowercase())),
            runtime: Some("120".to_string()),
            released: None,
            trailer: None,
            certification: None,
            torrents,
            genres: vec!["drama".to_string()],
            images: Images::default(),
            rating: Rating::default(),
        }
    }

    /// Create a test show summary.
    pub fn show_summary(id: &str, title: &str) -> ShowSummary {
        ShowSummary {
            id: id.to_string(),
            imdb_id: Some(id.to_string()),
            tvdb_id: None,
            title: title.to_string(),
            year: Some("2011".to_string()),
            slug: Some(title.to_lowercase().replace(' ', "-")),
            num_seasons: Some(1),
            images: Images::default(),
            rating: Rating::default(),
        }
    }

    /// Create a test show with the given episodes.
    pub fn show(id: &str, title: &str, episodes: Vec<Episode>) -> Show {
        Show {
            summary: show_summary(id, title),
            synopsis: None,
            runtime: Some("60".to_string()),
            country: None,
            network: None,
            air_day: None,
            air_time: None,
            status: Some("ended".to_string()),
            last_updated: None,
            genres: vec!["drama".to_string()],
            episodes,
        }
    }

    /// Create a test episode with a flat torrent table.
    pub fn episode(season: u32, episode: u32, torrents: &[(&str, u32, u32)]) -> Episode {
        Episode {
            season,
            episode,
            title: Some(format!("Episode {}", episode)),
            overview: None,
            tvdb_id: None,
            first_aired: None,
            date_based: false,
            torrents: flat_table(torrents),
        }
    }
}

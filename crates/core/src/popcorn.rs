//! Catalog access combined with torrent selection.

use tracing::info;

use crate::api::{PopcornApi, PopcornClient, PopcornError};
use crate::config::ClientConfig;
use crate::logging::init_logging_from_config;
use crate::torrent::{BestTorrent, QualityTable, TorrentSelector};

/// A catalog backend paired with a torrent selector.
///
/// Generic over the backend so tests can use `testing::MockPopcornApi`.
pub struct PopcornTime<A: PopcornApi = PopcornClient> {
    api: A,
    selector: TorrentSelector,
}

impl PopcornTime<PopcornClient> {
    /// Create an HTTP-backed instance from configuration.
    ///
    /// Installs logging at the configured level unless a subscriber is
    /// already set. The configuration is not validated here; see
    /// `validate_config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, PopcornError> {
        init_logging_from_config(config);

        Ok(Self::new(
            PopcornClient::new(config)?,
            TorrentSelector::from_config(config),
        ))
    }
}

impl<A: PopcornApi> PopcornTime<A> {
    pub fn new(api: A, selector: TorrentSelector) -> Self {
        Self { api, selector }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn selector(&self) -> &TorrentSelector {
        &self.selector
    }

    /// Fetch a movie and select its best torrent.
    ///
    /// `Ok(None)` means the movie exists but no torrent qualified.
    pub async fn best_movie_torrent(
        &self,
        movie_id: &str,
        min_quality: Option<u32>,
        revert_to_default: bool,
    ) -> Result<Option<BestTorrent>, PopcornError> {
        let movie = self.api.movie(movie_id).await?;
        Ok(self
            .selector
            .best_torrent(&movie.torrents, min_quality, revert_to_default))
    }

    /// Fetch a show and select the best torrent of one episode.
    ///
    /// `Ok(None)` when the episode is not listed or no torrent qualified.
    pub async fn best_episode_torrent(
        &self,
        show_id: &str,
        season: u32,
        episode: u32,
        min_quality: Option<u32>,
        revert_to_default: bool,
    ) -> Result<Option<BestTorrent>, PopcornError> {
        let show = self.api.show(show_id).await?;

        let Some(found) = show.episode(season, episode) else {
            info!(show_id, season, episode, "Episode not listed");
            return Ok(None);
        };

        Ok(self
            .selector
            .best_torrent(&found.torrents, min_quality, revert_to_default))
    }

    /// Fetch a movie and return its torrents without camera releases.
    pub async fn movie_torrents_without_cam(
        &self,
        movie_id: &str,
    ) -> Result<Option<QualityTable>, PopcornError> {
        let movie = self.api.movie(movie_id).await?;
        Ok(self.selector.remove_cam_torrents(&movie.torrents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockPopcornApi};
    use crate::torrent::{TorrentDescriptor, TorrentTable};

    fn popcorn() -> PopcornTime<MockPopcornApi> {
        PopcornTime::new(MockPopcornApi::new(), TorrentSelector::new("en"))
    }

    #[tokio::test]
    async fn test_best_movie_torrent() {
        let popcorn = popcorn();
        popcorn
            .api()
            .add_movie(fixtures::movie(
                "tt0111161",
                "The Shawshank Redemption",
                fixtures::language_table(
                    "en",
                    &[("720p", 100, 20), ("1080p", 40, 10)],
                ),
            ))
            .await;

        let best = popcorn
            .best_movie_torrent("tt0111161", Some(720), false)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(best.quality, 1080);
    }

    #[test]
    fn test_from_config_applies_log_level() {
        let config = ClientConfig::default().with_log_level(crate::logging::LogLevel::Debug);
        let popcorn = PopcornTime::from_config(&config).unwrap();

        assert_eq!(popcorn.selector().language(), "en");
        // Logging was installed by construction, a second install is refused
        assert!(!crate::logging::init_logging(config.log_level));
    }

    #[tokio::test]
    async fn test_best_movie_torrent_unknown_movie() {
        let result = popcorn().best_movie_torrent("tt0", None, false).await;
        assert!(matches!(
            result,
            Err(PopcornError::RequestFailed { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_best_episode_torrent_missing_episode() {
        let popcorn = popcorn();
        popcorn
            .api()
            .add_show(fixtures::show(
                "tt0944947",
                "Game of Thrones",
                vec![fixtures::episode(1, 1, &[("720p", 5, 1)])],
            ))
            .await;

        let found = popcorn
            .best_episode_torrent("tt0944947", 1, 1, None, false)
            .await
            .unwrap();
        assert_eq!(found.unwrap().quality, 720);

        let missing = popcorn
            .best_episode_torrent("tt0944947", 2, 1, None, false)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_movie_torrents_without_cam() {
        let popcorn = PopcornTime::new(
            MockPopcornApi::new(),
            TorrentSelector::new("en").with_cam_keywords(vec!["CAM".to_string()]),
        );
        let table: QualityTable = [(
            "720p",
            TorrentDescriptor::new("magnet:?xt=urn:btih:e&dn=Movie.CAM", 10, 1),
        )]
        .into_iter()
        .collect();
        let movie = fixtures::movie("tt1", "Cam Only", TorrentTable::Flat(table));
        popcorn.api().add_movie(movie).await;

        let result = popcorn.movie_torrents_without_cam("tt1").await.unwrap();
        assert!(result.is_none());
    }
}

//! HTTP client for the Popcorn Time API.
//!
//! Every endpoint is a plain GET returning JSON. There is no retry, backoff
//! or explicit timeout; reqwest's defaults apply.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::ClientConfig;

use super::types::{CatalogStats, Movie, ServerStatus, Show, ShowSummary};
use super::{PopcornApi, PopcornError};

/// Popcorn Time API client.
#[derive(Debug, Clone)]
pub struct PopcornClient {
    client: Client,
    base_url: String,
}

impl PopcornClient {
    /// Create a client for the configured base URL.
    pub fn new(config: &ClientConfig) -> Result<Self, PopcornError> {
        Self::with_base_url(config.base_url.clone())
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, PopcornError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the base URL and `path`, tolerating slashes on either side.
    fn build_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Fetch `path` and return the raw JSON body.
    pub async fn get_json(&self, path: &str) -> Result<Value, PopcornError> {
        self.get(path).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, PopcornError> {
        let url = self.build_url(path);

        debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(
                "Request to {} failed with status code {}",
                url,
                status.as_u16()
            );
            return Err(PopcornError::RequestFailed {
                status: status.as_u16(),
                url,
            });
        }

        response.json::<T>().await.map_err(|e| {
            PopcornError::ParseError(format!("Failed to parse response from {}: {}", url, e))
        })
    }
}

#[async_trait]
impl PopcornApi for PopcornClient {
    async fn server_status(&self) -> Result<ServerStatus, PopcornError> {
        let status: ServerStatus = self.get("/status").await?;
        info!("Got status");
        Ok(status)
    }

    async fn shows_stats(&self) -> Result<CatalogStats, PopcornError> {
        let stats: CatalogStats = self.get("/shows/stat").await?;
        info!("Got shows stats");
        Ok(stats)
    }

    async fn shows_page(&self, page: u32) -> Result<Vec<ShowSummary>, PopcornError> {
        let shows: Vec<ShowSummary> = self.get(&format!("/shows/{}", page)).await?;
        info!(count = shows.len(), "Got shows page {}", page);
        Ok(shows)
    }

    async fn show(&self, show_id: &str) -> Result<Show, PopcornError> {
        let show: Show = self
            .get(&format!("/show/{}", urlencoding::encode(show_id)))
            .await?;
        info!("Got show {}", show_id);
        Ok(show)
    }

    async fn random_show(&self) -> Result<Show, PopcornError> {
        let show: Show = self.get("/random/show").await?;
        info!("Got random show {}", show.id());
        Ok(show)
    }

    async fn movies_stats(&self) -> Result<CatalogStats, PopcornError> {
        let stats: CatalogStats = self.get("/movies/stat").await?;
        info!("Got movies stats");
        Ok(stats)
    }

    async fn movies_page(&self, page: u32) -> Result<Vec<Movie>, PopcornError> {
        let movies: Vec<Movie> = self.get(&format!("/movies/{}", page)).await?;
        info!(count = movies.len(), "Got movies page {}", page);
        Ok(movies)
    }

    async fn movie(&self, movie_id: &str) -> Result<Movie, PopcornError> {
        let movie: Movie = self
            .get(&format!("/movie/{}", urlencoding::encode(movie_id)))
            .await?;
        info!("Got movie {}", movie_id);
        Ok(movie)
    }

    async fn random_movie(&self) -> Result<Movie, PopcornError> {
        let movie: Movie = self.get("/random/movie").await?;
        info!("Got random movie {}", movie.id);
        Ok(movie)
    }
}

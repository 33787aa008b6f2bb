//! Popcorn Time catalog API.
//!
//! This module provides the HTTP client for the catalog endpoints and the
//! `PopcornApi` trait it implements, so callers can swap in a mock.

mod client;
mod types;

pub use client::PopcornClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to the API.
#[derive(Debug, Error)]
pub enum PopcornError {
    /// The server answered with something other than HTTP 200.
    #[error("Request to {url} failed with status code {status}")]
    RequestFailed { status: u16, url: String },

    /// HTTP transport failed (DNS, connection, TLS).
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl PopcornError {
    /// HTTP status code for `RequestFailed`.
    pub fn status(&self) -> Option<u16> {
        match self {
            PopcornError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Catalog operations of the Popcorn Time API.
#[async_trait]
pub trait PopcornApi: Send + Sync {
    /// Get the server status.
    async fn server_status(&self) -> Result<ServerStatus, PopcornError>;

    // Shows

    /// Get the number of shows per genre.
    async fn shows_stats(&self) -> Result<CatalogStats, PopcornError>;

    /// Get one page of the show catalog (pages start at 1).
    async fn shows_page(&self, page: u32) -> Result<Vec<ShowSummary>, PopcornError>;

    /// Get a show with its episodes by IMDb ID.
    async fn show(&self, show_id: &str) -> Result<Show, PopcornError>;

    /// Get a random show.
    async fn random_show(&self) -> Result<Show, PopcornError>;

    // Movies

    /// Get the number of movies per genre.
    async fn movies_stats(&self) -> Result<CatalogStats, PopcornError>;

    /// Get one page of the movie catalog (pages start at 1).
    async fn movies_page(&self, page: u32) -> Result<Vec<Movie>, PopcornError>;

    /// Get a movie by IMDb ID.
    async fn movie(&self, movie_id: &str) -> Result<Movie, PopcornError>;

    /// Get a random movie.
    async fn random_movie(&self) -> Result<Movie, PopcornError>;
}

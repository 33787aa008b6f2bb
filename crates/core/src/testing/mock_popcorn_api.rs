//! Mock catalog API for testing.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::api::{
    CatalogStats, Movie, PopcornApi, PopcornError, ServerStatus, Show, ShowSummary,
};

/// A recorded API call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedApiCall {
    ServerStatus,
    ShowsStats,
    ShowsPage { page: u32 },
    Show { show_id: String },
    RandomShow,
    MoviesStats,
    MoviesPage { page: u32 },
    Movie { movie_id: String },
    RandomMovie,
}

/// Mock implementation of the PopcornApi trait.
///
/// Provides controllable behavior for testing:
/// - Serve configured movies, shows and catalog pages
/// - Track calls for assertions
/// - Simulate failures
///
/// Unknown titles fail with a 404 `RequestFailed`, like the real server.
/// The random endpoints return the title with the smallest ID so tests
/// stay deterministic.
#[derive(Debug)]
pub struct MockPopcornApi {
    /// Movies by catalog ID.
    movies: Arc<RwLock<BTreeMap<String, Movie>>>,
    /// Shows by catalog ID.
    shows: Arc<RwLock<BTreeMap<String, Show>>>,
    /// Movie catalog pages by page number.
    movie_pages: Arc<RwLock<HashMap<u32, Vec<Movie>>>>,
    /// Show catalog pages by page number.
    show_pages: Arc<RwLock<HashMap<u32, Vec<ShowSummary>>>>,
    status: Arc<RwLock<Option<ServerStatus>>>,
    shows_stats: Arc<RwLock<CatalogStats>>,
    movies_stats: Arc<RwLock<CatalogStats>>,
    /// Recorded calls.
    calls: Arc<RwLock<Vec<RecordedApiCall>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<PopcornError>>>,
}

impl Default for MockPopcornApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPopcornApi {
    /// Create a new empty mock API.
    pub fn new() -> Self {
        Self {
            movies: Arc::new(RwLock::new(BTreeMap::new())),
            shows: Arc::new(RwLock::new(BTreeMap::new())),
            movie_pages: Arc::new(RwLock::new(HashMap::new())),
            show_pages: Arc::new(RwLock::new(HashMap::new())),
            status: Arc::new(RwLock::new(None)),
            shows_stats: Arc::new(RwLock::new(CatalogStats::default())),
            movies_stats: Arc::new(RwLock::new(CatalogStats::default())),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    // =========================================================================
    // Catalog Configuration
    // =========================================================================

    /// Add a movie, replacing any movie with the same ID.
    pub async fn add_movie(&self, movie: Movie) {
        self.movies.write().await.insert(movie.id.clone(), movie);
    }

    /// Add a show, replacing any show with the same ID.
    pub async fn add_show(&self, show: Show) {
        self.shows.write().await.insert(show.id().to_string(), show);
    }

    /// Set the content of one movie catalog page.
    pub async fn set_movies_page(&self, page: u32, movies: Vec<Movie>) {
        self.movie_pages.write().await.insert(page, movies);
    }

    /// Set the content of one show catalog page.
    pub async fn set_shows_page(&self, page: u32, shows: Vec<ShowSummary>) {
        self.show_pages.write().await.insert(page, shows);
    }

    /// Set the server status. Without one, `server_status` fails with 404.
    pub async fn set_status(&self, status: ServerStatus) {
        *self.status.write().await = Some(status);
    }

    pub async fn set_shows_stats(&self, stats: CatalogStats) {
        *self.shows_stats.write().await = stats;
    }

    pub async fn set_movies_stats(&self, stats: CatalogStats) {
        *self.movies_stats.write().await = stats;
    }

    // =========================================================================
    // Call Recording
    // =========================================================================

    /// Get all recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedApiCall> {
        self.calls.read().await.clone()
    }

    /// Clear recorded calls.
    pub async fn clear_recorded(&self) {
        self.calls.write().await.clear();
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: PopcornError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }

    /// Record the call, then fail if an error is pending.
    async fn begin(&self, call: RecordedApiCall) -> Result<(), PopcornError> {
        self.calls.write().await.push(call);
        match self.next_error.write().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn not_found(path: String) -> PopcornError {
    PopcornError::RequestFailed {
        status: 404,
        url: path,
    }
}

#[async_trait]
impl PopcornApi for MockPopcornApi {
    async fn server_status(&self) -> Result<ServerStatus, PopcornError> {
        self.begin(RecordedApiCall::ServerStatus).await?;

        self.status
            .read()
            .await
            .clone()
            .ok_or_else(|| not_found("/status".to_string()))
    }

    async fn shows_stats(&self) -> Result<CatalogStats, PopcornError> {
        self.begin(RecordedApiCall::ShowsStats).await?;
        Ok(self.shows_stats.read().await.clone())
    }

    async fn shows_page(&self, page: u32) -> Result<Vec<ShowSummary>, PopcornError> {
        self.begin(RecordedApiCall::ShowsPage { page }).await?;
        Ok(self
            .show_pages
            .read()
            .await
            .get(&page)
            .cloned()
            .unwrap_or_default())
    }

    async fn show(&self, show_id: &str) -> Result<Show, PopcornError> {
        self.begin(RecordedApiCall::Show {
            show_id: show_id.to_string(),
        })
        .await?;

        self.shows
            .read()
            .await
            .get(show_id)
            .cloned()
            .ok_or_else(|| not_found(format!("/show/{}", show_id)))
    }

    async fn random_show(&self) -> Result<Show, PopcornError> {
        self.begin(RecordedApiCall::RandomShow).await?;

        self.shows
            .read()
            .await
            .values()
            .next()
            .cloned()
            .ok_or_else(|| not_found("/random/show".to_string()))
    }

    async fn movies_stats(&self) -> Result<CatalogStats, PopcornError> {
        self.begin(RecordedApiCall::MoviesStats).await?;
        Ok(self.movies_stats.read().await.clone())
    }

    async fn movies_page(&self, page: u32) -> Result<Vec<Movie>, PopcornError> {
        self.begin(RecordedApiCall::MoviesPage { page }).await?;
        Ok(self
            .movie_pages
            .read()
            .await
            .get(&page)
            .cloned()
            .unwrap_or_default())
    }

    async fn movie(&self, movie_id: &str) -> Result<Movie, PopcornError> {
        self.begin(RecordedApiCall::Movie {
            movie_id: movie_id.to_string(),
        })
        .await?;

        self.movies
            .read()
            .await
            .get(movie_id)
            .cloned()
            .ok_or_else(|| not_found(format!("/movie/{}", movie_id)))
    }

    async fn random_movie(&self) -> Result<Movie, PopcornError> {
        self.begin(RecordedApiCall::RandomMovie).await?;

        self.movies
            .read()
            .await
            .values()
            .next()
            .cloned()
            .ok_or_else(|| not_found("/random/movie".to_string()))
    }
}

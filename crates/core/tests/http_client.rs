//! HTTP client integration tests.
//!
//! These tests run the client against an in-process stub of the catalog
//! server and verify:
//! - Every endpoint hits the right path and decodes its response
//! - Non-200 answers surface as `RequestFailed` with status and URL
//! - Undecodable bodies surface as `ParseError`

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use popcorn_core::{
    ClientConfig, PopcornApi, PopcornClient, PopcornError, PopcornTime, TorrentSelector,
    TorrentTable,
};

async fn status() -> Json<Value> {
    Json(json!({
        "repo": "https://github.com/popcorn-official/popcorn-api",
        "server": "stub",
        "status": "Idle",
        "totalMovies": 2,
        "totalShows": 1,
        "uptime": 42,
        "version": "2.2.0"
    }))
}

async fn shows_stats() -> Json<Value> {
    Json(json!({
        "drama": { "count": 1, "title": "Drama" },
        "comedy": { "count": 0 }
    }))
}

async fn movies_stats() -> Json<Value> {
    Json(json!({ "drama": { "count": 2 } }))
}

fn show_summary_json() -> Value {
    json!({
        "_id": "tt0944947",
        "imdb_id": "tt0944947",
        "tvdb_id": "121361",
        "title": "Game of Thrones",
        "year": "2011",
        "slug": "game-of-thrones",
        "num_seasons": 8
    })
}

fn show_json() -> Value {
    let mut show = show_summary_json();
    show["status"] = json!("ended");
    show["episodes"] = json!([
        {
            "season": 1,
            "episode": 1,
            "title": "Winter Is Coming",
            "torrents": {
                "0": { "url": "magnet:?xt=urn:btih:s1e1&dn=GoT.S01E01", "seeds": 3, "peers": 1 },
                "480p": { "url": "magnet:?xt=urn:btih:s1e1-480&dn=GoT.S01E01.480p", "seeds": 3, "peers": 1 },
                "720p": { "url": "magnet:?xt=urn:btih:s1e1-720&dn=GoT.S01E01.720p", "seeds": 40, "peers": 9 }
            }
        }
    ]);
    show
}

fn movie_json(id: &str) -> Value {
    json!({
        "_id": id,
        "imdb_id": id,
        "title": "The Shawshank Redemption",
        "year": "1994",
        "runtime": "142",
        "torrents": {
            "en": {
                "720p": { "url": "magnet:?xt=urn:btih:a&dn=Shawshank.720p", "seed": 120, "peer": 30 },
                "1080p": { "url": "magnet:?xt=urn:btih:b&dn=Shawshank.1080p", "seed": 300, "peer": 45 }
            },
            "fr": {
                "720p": { "url": "magnet:?xt=urn:btih:c&dn=Shawshank.FRENCH.720p", "seed": 12, "peer": 3 }
            }
        },
        "genres": ["drama"]
    })
}

async fn shows_page(Path(page): Path<u32>) -> Json<Value> {
    match page {
        1 => Json(json!([show_summary_json()])),
        _ => Json(json!([])),
    }
}

async fn show(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    if id == "tt0944947" {
        Ok(Json(show_json()))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

async fn random_show() -> Json<Value> {
    Json(show_json())
}

async fn movies_page(Path(page): Path<u32>) -> Response {
    match page {
        1 => Json(json!([movie_json("tt0111161")])).into_response(),
        2 => (StatusCode::ACCEPTED, Json(json!([]))).into_response(),
        3 => "<html>maintenance</html>".into_response(),
        _ => Json(json!([])).into_response(),
    }
}

async fn movie(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    if id == "tt0111161" {
        Ok(Json(movie_json(&id)))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

async fn random_movie() -> Json<Value> {
    Json(movie_json("tt0111161"))
}

/// Start the stub server and return its base URL.
async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/status", get(status))
        .route("/shows/stat", get(shows_stats))
        .route("/shows/{page}", get(shows_page))
        .route("/show/{id}", get(show))
        .route("/random/show", get(random_show))
        .route("/movies/stat", get(movies_stats))
        .route("/movies/{page}", get(movies_page))
        .route("/movie/{id}", get(movie))
        .route("/random/movie", get(random_movie));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub server");
    let addr = listener.local_addr().expect("Stub server has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub server failed");
    });

    format!("http://{}", addr)
}

async fn client() -> PopcornClient {
    let base_url = spawn_stub().await;
    PopcornClient::new(&ClientConfig::default().with_base_url(base_url))
        .expect("Failed to create client")
}

// =============================================================================
// Endpoints
// =============================================================================

#[tokio::test]
async fn test_server_status() {
    let status = client().await.server_status().await.unwrap();
    assert_eq!(status.server.as_deref(), Some("stub"));
    assert_eq!(status.total_movies, Some(2));
    assert_eq!(status.uptime, Some(42));
}

#[tokio::test]
async fn test_catalog_stats() {
    let client = client().await;

    let shows = client.shows_stats().await.unwrap();
    assert_eq!(shows.count("drama"), Some(1));
    assert_eq!(shows.count("comedy"), Some(0));

    let movies = client.movies_stats().await.unwrap();
    assert_eq!(movies.count("drama"), Some(2));
    assert_eq!(movies.count("horror"), None);
}

#[tokio::test]
async fn test_shows_page() {
    let client = client().await;

    let page = client.shows_page(1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, "tt0944947");
    assert_eq!(page[0].num_seasons, Some(8));

    assert!(client.shows_page(9).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_show_and_random_show() {
    let client = client().await;

    let show = client.show("tt0944947").await.unwrap();
    assert_eq!(show.summary.title, "Game of Thrones");
    let episode = show.episode(1, 1).unwrap();
    assert!(matches!(episode.torrents, TorrentTable::Flat(_)));

    let random = client.random_show().await.unwrap();
    assert_eq!(random.id(), "tt0944947");
}

#[tokio::test]
async fn test_movies_page_movie_and_random_movie() {
    let client = client().await;

    let page = client.movies_page(1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].torrents.languages(), vec!["en", "fr"]);

    let movie = client.movie("tt0111161").await.unwrap();
    assert_eq!(movie.year.as_deref(), Some("1994"));

    let random = client.random_movie().await.unwrap();
    assert_eq!(random.id, "tt0111161");
}

#[tokio::test]
async fn test_get_json() {
    let client = client().await;
    let value = client.get_json("status").await.unwrap();
    assert_eq!(value["status"], "Idle");
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_not_found_maps_to_request_failed() {
    let client = client().await;
    let base_url = client.base_url().to_string();

    match client.movie("tt0000000").await {
        Err(PopcornError::RequestFailed { status, url }) => {
            assert_eq!(status, 404);
            assert_eq!(url, format!("{}/movie/tt0000000", base_url));
        }
        other => panic!("Expected RequestFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_200_success_is_a_failure() {
    let err = client().await.movies_page(2).await.unwrap_err();
    assert_eq!(err.status(), Some(202));
}

#[tokio::test]
async fn test_invalid_json_maps_to_parse_error() {
    let err = client().await.movies_page(3).await.unwrap_err();
    match err {
        PopcornError::ParseError(message) => assert!(message.contains("/movies/3")),
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_server_maps_to_http_error() {
    let client = PopcornClient::with_base_url("http://127.0.0.1:1").unwrap();
    let err = client.server_status().await.unwrap_err();
    assert!(matches!(err, PopcornError::HttpError(_)));
    assert_eq!(err.status(), None);
}

// =============================================================================
// Selection over HTTP
// =============================================================================

#[tokio::test]
async fn test_best_torrents_over_http() {
    let base_url = spawn_stub().await;
    let config = ClientConfig::default()
        .with_base_url(base_url)
        .with_language("FR");
    let popcorn = PopcornTime::from_config(&config).unwrap();

    // Only the French 720p exists, below the default 1080 floor
    let none = popcorn
        .best_movie_torrent("tt0111161", None, false)
        .await
        .unwrap();
    assert!(none.is_none());

    let french = popcorn
        .best_movie_torrent("tt0111161", Some(720), false)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(french.quality, 720);
    assert!(french.torrent.url.contains("FRENCH"));

    let episode = popcorn
        .best_episode_torrent("tt0944947", 1, 1, None, true)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(episode.quality, 0);
    assert!(episode.torrent.url.ends_with("GoT.S01E01"));
}

#[tokio::test]
async fn test_selector_seed_threshold_over_http() {
    let base_url = spawn_stub().await;
    let popcorn = PopcornTime::new(
        PopcornClient::with_base_url(base_url).unwrap(),
        TorrentSelector::new("en").with_thresholds(200, 0),
    );

    let best = popcorn
        .best_movie_torrent("tt0111161", None, false)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(best.quality, 1080);
    assert_eq!(best.torrent.seeds, 300);
}

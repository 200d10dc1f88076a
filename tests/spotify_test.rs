use std::{collections::HashMap, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use serde_json::{Value, json};
use songlist::{
    error::CatalogError,
    management::TokenManager,
    provider::CatalogProvider,
    spotify::{MAX_RETRIES, SpotifyClient},
    types::Token,
};
use tokio::{sync::Mutex, time::Instant};

const ACCESS_TOKEN: &str = "test-access-token";

// Scripted stand-in for the Spotify Web API
#[derive(Clone)]
struct FakeSpotify {
    base_url: String,
    hits: Arc<Mutex<HashMap<String, usize>>>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl FakeSpotify {
    async fn hit(&self, key: &str) -> usize {
        let mut hits = self.hits.lock().await;
        let count = hits.entry(key.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    async fn hits(&self, key: &str) -> usize {
        self.hits.lock().await.get(key).copied().unwrap_or(0)
    }
}

fn album(id: &str, release_date: &str, precision: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Release {}", id),
        "release_date": release_date,
        "release_date_precision": precision,
        "album_type": "album",
        "album_group": "album",
        "total_tracks": 2,
        "artists": [{ "id": "artist_1", "name": "Artist" }],
        "external_urls": { "spotify": format!("https://open.spotify.com/album/{}", id) }
    })
}

fn page(items: Vec<Value>, next: Option<String>) -> Response {
    Json(json!({ "items": items, "next": next })).into_response()
}

fn tracks_page() -> Response {
    page(
        vec![
            json!({ "id": "t1", "name": "First", "track_number": 1 }),
            json!({ "id": "t2", "name": "Second", "track_number": 2 }),
        ],
        None,
    )
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", ACCESS_TOKEN))
}

async fn artist_albums(
    State(api): State<FakeSpotify>,
    Path(artist_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    api.queries.lock().await.push(params);

    match artist_id.as_str() {
        "artist_1" => page(
            vec![album("a1", "2018-05-04", "day"), album("a2", "2019", "year")],
            Some(format!("{}/pages/artist_1-2", api.base_url)),
        ),
        "bad_dates" => page(vec![album("a1", "2018-05-04T10", "hour")], None),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn next_page(State(api): State<FakeSpotify>, Path(page_id): Path<String>) -> Response {
    api.hit(&page_id).await;
    match page_id.as_str() {
        "artist_1-2" => page(vec![album("a3", "2021-02", "month")], None),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn album_tracks(State(api): State<FakeSpotify>, Path(release_id): Path<String>) -> Response {
    let attempt = api.hit(&release_id).await;

    match (release_id.as_str(), attempt) {
        ("flaky", 1) => StatusCode::BAD_GATEWAY.into_response(),
        ("down", _) => StatusCode::BAD_GATEWAY.into_response(),
        ("throttled", 1) => {
            (StatusCode::TOO_MANY_REQUESTS, [(header::RETRY_AFTER, "30")]).into_response()
        }
        ("limited", _) => {
            (StatusCode::TOO_MANY_REQUESTS, [(header::RETRY_AFTER, "121")]).into_response()
        }
        ("flaky" | "throttled" | "steady", _) => tracks_page(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

// Helper function to serve the fake API and connect a client to it
async fn spawn_api() -> (FakeSpotify, SpotifyClient) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let api = FakeSpotify {
        base_url: base_url.clone(),
        hits: Arc::new(Mutex::new(HashMap::new())),
        queries: Arc::new(Mutex::new(Vec::new())),
    };

    let app = Router::new()
        .route("/artists/{id}/albums", get(artist_albums))
        .route("/pages/{page}", get(next_page))
        .route("/albums/{id}/tracks", get(album_tracks))
        .with_state(api.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let token = Token {
        access_token: ACCESS_TOKEN.to_string(),
        refresh_token: "test-refresh-token".to_string(),
        scope: String::new(),
        expires_in: 3600,
        obtained_at: Utc::now().timestamp() as u64,
    };
    let client = SpotifyClient::new(TokenManager::new(token), base_url, None);

    (api, client)
}

#[tokio::test(start_paused = true)]
async fn test_artist_releases_follow_next_links() {
    let (api, mut client) = spawn_api().await;

    let releases = client.artist_releases("artist_1").await.unwrap();

    // Both pages, in listing order
    let ids: Vec<&str> = releases.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a2", "a3"]);
    assert_eq!(api.hits("artist_1-2").await, 1);

    // Coarse dates fall on the first day of their period
    assert_eq!(releases[1].release_date.to_string(), "2019-01-01");
    assert_eq!(releases[2].release_date.to_string(), "2021-02-01");

    // Listing parameters are only sent with the first request
    let queries = api.queries.lock().await;
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].get("limit").map(String::as_str), Some("50"));
    assert!(queries[0]["include_groups"].contains("appears_on"));
}

#[tokio::test(start_paused = true)]
async fn test_unparseable_release_date_fails_listing() {
    let (_api, mut client) = spawn_api().await;

    let err = client.artist_releases("bad_dates").await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::InvalidReleaseDate { precision, .. }) if precision == "hour"
    ));
}

#[tokio::test(start_paused = true)]
async fn test_bad_gateway_is_retried() {
    let (api, mut client) = spawn_api().await;
    let start = Instant::now();

    let tracks = client.release_tracks("flaky").await.unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].name, "First");
    assert_eq!(api.hits("flaky").await, 2);
    assert!(start.elapsed().as_secs() >= 10);
}

#[tokio::test(start_paused = true)]
async fn test_bad_gateway_gives_up_after_max_retries() {
    let (api, mut client) = spawn_api().await;

    let result = client.release_tracks("down").await;

    assert!(result.is_err());
    assert_eq!(api.hits("down").await, MAX_RETRIES as usize);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_waits_for_retry_after() {
    let (api, mut client) = spawn_api().await;
    let start = Instant::now();

    let tracks = client.release_tracks("throttled").await.unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(api.hits("throttled").await, 2);
    assert!(start.elapsed().as_secs() >= 30);
}

#[tokio::test(start_paused = true)]
async fn test_excessive_retry_after_aborts() {
    let (api, mut client) = spawn_api().await;

    let result = client.release_tracks("limited").await;

    assert!(result.is_err());
    assert_eq!(api.hits("limited").await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_release_tracks_single_page() {
    let (api, mut client) = spawn_api().await;

    let tracks = client.release_tracks("steady").await.unwrap();

    let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);
    assert_eq!(api.hits("steady").await, 1);
}

//! Integration tests for the trackduel-web API
//!
//! Runs the real router against an in-memory SQLite database: song
//! creation, pairing selection, vote submission (decided and skipped),
//! rankings, and the vote log.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot`
use trackduel_web::{build_router, AppState};

/// Test helper: fresh app over an in-memory database
async fn setup_app() -> Router {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Should create in-memory database");
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .unwrap();
    trackduel_common::db::init_schema(&pool)
        .await
        .expect("Should initialize schema");

    build_router(AppState::new(pool))
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: add a song and return its id
async fn add_song(app: &Router, title: &str, artist: &str) -> i64 {
    let request = post_json("/api/songs", json!({ "title": title, "artist": artist }));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = extract_json(response.into_body()).await;
    body["id"].as_i64().expect("Created song should have an id")
}

async fn song_rating(app: &Router, id: i64) -> f64 {
    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/songs/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    body["rating"].as_f64().unwrap()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app().await;

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "trackduel-web");
    assert!(body["version"].is_string());
}

// =============================================================================
// Song catalog
// =============================================================================

#[tokio::test]
async fn test_create_song_defaults_to_1500() {
    let app = setup_app().await;

    let request = post_json(
        "/api/songs",
        json!({ "title": "Karma Police", "artist": "Radiohead", "album": "OK Computer", "release_year": 1997 }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["title"], "Karma Police");
    assert_eq!(body["album"], "OK Computer");
    assert_eq!(body["rating"].as_f64().unwrap(), 1500.0);

    let id = body["id"].as_i64().unwrap();
    let response = app
        .oneshot(get_request(&format!("/api/songs/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_song_rejects_blank_title() {
    let app = setup_app().await;

    let request = post_json("/api/songs", json!({ "title": "   ", "artist": "Band" }));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_create_song_rejects_overlong_artist() {
    let app = setup_app().await;

    let request = post_json(
        "/api/songs",
        json!({ "title": "Song", "artist": "x".repeat(201) }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_song_is_404() {
    let app = setup_app().await;

    let response = app.oneshot(get_request("/api/songs/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

// =============================================================================
// Pairing selection
// =============================================================================

#[tokio::test]
async fn test_pairing_empty_catalog_is_no_content() {
    let app = setup_app().await;

    let response = app.oneshot(get_request("/api/pairing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_pairing_single_song_is_no_content() {
    let app = setup_app().await;
    add_song(&app, "Alone", "Band").await;

    let response = app.oneshot(get_request("/api/pairing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_pairing_returns_two_distinct_songs() {
    let app = setup_app().await;
    add_song(&app, "First", "Band").await;
    add_song(&app, "Second", "Band").await;

    for _ in 0..10 {
        let response = app.clone().oneshot(get_request("/api/pairing")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = extract_json(response.into_body()).await;
        let a = body["song_a"]["id"].as_i64().unwrap();
        let b = body["song_b"]["id"].as_i64().unwrap();
        assert_ne!(a, b);
    }
}

// =============================================================================
// Vote submission
// =============================================================================

#[tokio::test]
async fn test_decided_vote_moves_ratings() {
    let app = setup_app().await;
    let winner = add_song(&app, "Winner", "Band").await;
    let loser = add_song(&app, "Loser", "Band").await;

    let request = post_json("/api/vote", json!({ "winner_id": winner, "loser_id": loser }));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");

    // Even match at 1500/1500 with K=32 swings 16 points each way.
    assert!((song_rating(&app, winner).await - 1516.0).abs() < 1e-9);
    assert!((song_rating(&app, loser).await - 1484.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_skip_changes_no_ratings() {
    let app = setup_app().await;
    let a = add_song(&app, "A", "Band").await;
    let b = add_song(&app, "B", "Band").await;

    let request = post_json(
        "/api/vote",
        json!({ "winner_id": a, "loser_id": b, "skip": true }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(song_rating(&app, a).await, 1500.0);
    assert_eq!(song_rating(&app, b).await, 1500.0);

    // The skip still lands in the vote log, with no winner.
    let response = app.oneshot(get_request("/api/votes/recent")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 1);
    assert!(body["votes"][0]["winner_id"].is_null());
}

#[tokio::test]
async fn test_vote_unknown_song_is_404() {
    let app = setup_app().await;
    let known = add_song(&app, "Known", "Band").await;

    let request = post_json("/api/vote", json!({ "winner_id": known, "loser_id": 9999 }));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The failed vote must leave the known song untouched.
    assert_eq!(song_rating(&app, known).await, 1500.0);
}

#[tokio::test]
async fn test_vote_same_song_twice_is_400() {
    let app = setup_app().await;
    let song = add_song(&app, "Solo", "Band").await;

    let request = post_json("/api/vote", json!({ "winner_id": song, "loser_id": song }));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Rankings and vote log
// =============================================================================

#[tokio::test]
async fn test_rankings_order_and_stars() {
    let app = setup_app().await;
    let winner = add_song(&app, "Top", "Band").await;
    let loser = add_song(&app, "Bottom", "Band").await;

    let request = post_json("/api/vote", json!({ "winner_id": winner, "loser_id": loser }));
    app.clone().oneshot(request).await.unwrap();

    let response = app.oneshot(get_request("/api/rankings")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["rankings"][0]["id"].as_i64().unwrap(), winner);
    assert_eq!(body["rankings"][0]["rank"], 1);
    assert_eq!(body["rankings"][1]["id"].as_i64().unwrap(), loser);

    // 1516 in the default [1000, 1600] window: 4.3 stars exactly.
    assert!((body["rankings"][0]["stars"].as_f64().unwrap() - 4.3).abs() < 1e-9);
    // 1484: ratio 0.80666 -> 4.0333 -> 4.0
    assert!((body["rankings"][1]["stars"].as_f64().unwrap() - 4.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_recent_votes_respects_limit() {
    let app = setup_app().await;
    let a = add_song(&app, "A", "Band").await;
    let b = add_song(&app, "B", "Band").await;

    for _ in 0..3 {
        let request = post_json(
            "/api/vote",
            json!({ "winner_id": a, "loser_id": b, "skip": true }),
        );
        app.clone().oneshot(request).await.unwrap();
    }

    let response = app
        .oneshot(get_request("/api/votes/recent?limit=2"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["votes"].as_array().unwrap().len(), 2);
}

//! Song catalog and rankings endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use trackduel_common::db::models::Song;
use trackduel_common::rating;

use crate::db::{settings, songs};
use crate::{ApiError, ApiResult, AppState};

/// Longest accepted title or artist, matching the schema CHECK bound
const MAX_TEXT_LEN: usize = 200;

/// POST /api/songs request
#[derive(Debug, Deserialize)]
pub struct CreateSongRequest {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub release_year: Option<i64>,
}

/// POST /api/songs
///
/// Adds a song to the catalog with the default rating. Enrichment fields
/// (artwork, genre, duration) are filled in later by an external process.
pub async fn create_song(
    State(state): State<AppState>,
    Json(request): Json<CreateSongRequest>,
) -> ApiResult<(StatusCode, Json<Song>)> {
    let title = request.title.trim();
    let artist = request.artist.trim();

    if title.is_empty() || title.len() > MAX_TEXT_LEN {
        return Err(ApiError::BadRequest(format!(
            "title must be 1-{} characters",
            MAX_TEXT_LEN
        )));
    }
    if artist.is_empty() || artist.len() > MAX_TEXT_LEN {
        return Err(ApiError::BadRequest(format!(
            "artist must be 1-{} characters",
            MAX_TEXT_LEN
        )));
    }

    let new_song = songs::NewSong {
        title: title.to_string(),
        artist: artist.to_string(),
        album: request.album.filter(|a| !a.trim().is_empty()),
        release_year: request.release_year,
    };

    let song = songs::insert_song(&state.db, &new_song).await?;

    tracing::info!(song_id = song.id, title = %song.title, "Added song to catalog");

    Ok((StatusCode::CREATED, Json(song)))
}

/// GET /api/songs/:id
pub async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Song>> {
    let song = songs::get_song(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("song {}", id)))?;

    Ok(Json(song))
}

/// One row of the rankings list
#[derive(Debug, Serialize)]
pub struct RankingEntry {
    pub rank: usize,
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub rating: f64,
    /// Display-only 0-5 scale; the stored rating is never rounded
    pub stars: f64,
}

/// GET /api/rankings response
#[derive(Debug, Serialize)]
pub struct RankingsResponse {
    pub count: usize,
    pub rankings: Vec<RankingEntry>,
}

/// GET /api/rankings
///
/// The whole catalog ordered by rating descending, with the star transform
/// applied for display.
pub async fn get_rankings(State(state): State<AppState>) -> ApiResult<Json<RankingsResponse>> {
    let window_min = settings::get_setting_f64(&state.db, "stars_window_min")
        .await?
        .unwrap_or(rating::STARS_WINDOW_MIN);
    let window_max = settings::get_setting_f64(&state.db, "stars_window_max")
        .await?
        .unwrap_or(rating::STARS_WINDOW_MAX);

    let songs = songs::list_all_by_rating(&state.db).await?;

    let rankings: Vec<RankingEntry> = songs
        .into_iter()
        .enumerate()
        .map(|(idx, song)| RankingEntry {
            rank: idx + 1,
            id: song.id,
            title: song.title,
            artist: song.artist,
            album: song.album,
            rating: song.rating,
            stars: rating::stars_in_window(song.rating, window_min, window_max),
        })
        .collect();

    Ok(Json(RankingsResponse {
        count: rankings.len(),
        rankings,
    }))
}

/// Build song routes
pub fn song_routes() -> Router<AppState> {
    Router::new()
        .route("/api/songs", post(create_song))
        .route("/api/songs/:id", get(get_song))
        .route("/api/rankings", get(get_rankings))
}

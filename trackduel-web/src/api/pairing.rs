//! Matchup endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use trackduel_common::db::models::Song;

use crate::{engine, ApiResult, AppState};

/// GET /api/pairing response
#[derive(Debug, Serialize)]
pub struct PairingResponse {
    pub song_a: Song,
    pub song_b: Song,
}

/// GET /api/pairing
///
/// Returns the next matchup, or 204 No Content when the catalog has fewer
/// than two songs. 204 is the "add more songs" signal for the UI, not an
/// error.
pub async fn next_pairing(State(state): State<AppState>) -> ApiResult<Response> {
    match engine::pairing::next_pairing(&state.db).await? {
        Some((song_a, song_b)) => Ok(Json(PairingResponse { song_a, song_b }).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Build pairing routes
pub fn pairing_routes() -> Router<AppState> {
    Router::new().route("/api/pairing", get(next_pairing))
}

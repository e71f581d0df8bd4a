//! Vote submission and vote-log endpoints

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use trackduel_common::db::models::VoteRecord;

use crate::{db, engine, ApiError, ApiResult, AppState};

/// POST /api/vote request
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub winner_id: i64,
    pub loser_id: i64,
    /// Skips store a vote-log row but change no ratings; the two ids carry
    /// no implied ranking.
    #[serde(default)]
    pub skip: bool,
}

/// POST /api/vote response
#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub status: String,
}

/// POST /api/vote
///
/// Records a matchup outcome. 404 when a referenced song is missing from a
/// decided match; 400 when both ids name the same song.
pub async fn submit_vote(
    State(state): State<AppState>,
    Json(request): Json<VoteRequest>,
) -> ApiResult<Json<VoteResponse>> {
    if request.winner_id == request.loser_id {
        return Err(ApiError::BadRequest(
            "winner_id and loser_id must differ".to_string(),
        ));
    }

    if request.skip {
        engine::vote::submit_skip(&state.db, request.winner_id, request.loser_id).await?;
    } else {
        engine::vote::submit_match(&state.db, request.winner_id, request.loser_id).await?;
    }

    Ok(Json(VoteResponse {
        status: "ok".to_string(),
    }))
}

/// Query parameters for the vote log
#[derive(Debug, Deserialize)]
pub struct RecentVotesQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

/// GET /api/votes/recent response
#[derive(Debug, Serialize)]
pub struct RecentVotesResponse {
    pub count: usize,
    pub votes: Vec<VoteRecord>,
}

/// GET /api/votes/recent
///
/// Newest-first slice of the vote log, for audit and history views.
pub async fn recent_votes(
    State(state): State<AppState>,
    Query(query): Query<RecentVotesQuery>,
) -> ApiResult<Json<RecentVotesResponse>> {
    let limit = query.limit.clamp(1, 500);
    let votes = db::votes::recent_votes(&state.db, limit).await?;

    Ok(Json(RecentVotesResponse {
        count: votes.len(),
        votes,
    }))
}

/// Build vote routes
pub fn vote_routes() -> Router<AppState> {
    Router::new()
        .route("/api/vote", post(submit_vote))
        .route("/api/votes/recent", get(recent_votes))
}

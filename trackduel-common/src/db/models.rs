//! Database models

use serde::{Deserialize, Serialize};

/// A catalog song with its current rating
///
/// `rating` is owned by the store and mutated only by the vote-processing
/// path after a decided match. The enrichment fields (`artwork_url`,
/// `genre`, `duration_seconds`) are filled in by an external collaborator
/// and never touched here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub release_year: Option<i64>,
    pub rating: f64,
    pub artwork_url: Option<String>,
    pub genre: Option<String>,
    pub duration_seconds: Option<i64>,
}

/// An immutable vote-log entry
///
/// `winner_id` is `None` for a skipped matchup. Rows are written once and
/// never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRecord {
    pub id: i64,
    pub song_a_id: i64,
    pub song_b_id: i64,
    pub winner_id: Option<i64>,
    pub created_at: String,
}

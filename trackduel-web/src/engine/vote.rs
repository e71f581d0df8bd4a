//! Vote processing
//!
//! A decided match re-reads both songs' current ratings, computes the Elo
//! updates, and persists the two new ratings plus the vote-log row as one
//! atomic unit. Concurrent votes touching the same song serialize on the
//! write transaction instead of clobbering each other's updates.

use sqlx::SqlitePool;
use tracing::info;
use trackduel_common::rating;
use trackduel_common::{Error, Result};

use crate::db::votes;

/// Apply a decided match outcome
///
/// Fails with `Error::NotFound` (and writes nothing) when either song is
/// missing at update time. An early return before commit rolls the whole
/// transaction back.
pub async fn submit_match(pool: &SqlitePool, winner_id: i64, loser_id: i64) -> Result<()> {
    if winner_id == loser_id {
        return Err(Error::InvalidInput(
            "winner and loser must be different songs".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    // Ratings are re-read inside the transaction so two concurrent matches
    // on the same song cannot both apply updates from a stale snapshot.
    let winner_rating: Option<f64> = sqlx::query_scalar("SELECT rating FROM songs WHERE id = ?")
        .bind(winner_id)
        .fetch_optional(&mut *tx)
        .await?;
    let loser_rating: Option<f64> = sqlx::query_scalar("SELECT rating FROM songs WHERE id = ?")
        .bind(loser_id)
        .fetch_optional(&mut *tx)
        .await?;

    let Some(winner_rating) = winner_rating else {
        return Err(Error::NotFound(format!("song {}", winner_id)));
    };
    let Some(loser_rating) = loser_rating else {
        return Err(Error::NotFound(format!("song {}", loser_id)));
    };

    let (new_winner_rating, new_loser_rating) = rating::updated_ratings(winner_rating, loser_rating);

    sqlx::query("UPDATE songs SET rating = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?")
        .bind(new_winner_rating)
        .bind(winner_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("UPDATE songs SET rating = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?")
        .bind(new_loser_rating)
        .bind(loser_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("INSERT INTO votes (song_a_id, song_b_id, winner_id) VALUES (?, ?, ?)")
        .bind(winner_id)
        .bind(loser_id)
        .bind(winner_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(
        winner_id,
        loser_id,
        new_winner_rating,
        new_loser_rating,
        "Recorded decided match"
    );

    Ok(())
}

/// Record a skipped matchup
///
/// No rating changes; the vote row keeps both ids with a NULL winner so
/// history analysis can include or exclude skips.
pub async fn submit_skip(pool: &SqlitePool, song_a_id: i64, song_b_id: i64) -> Result<()> {
    if song_a_id == song_b_id {
        return Err(Error::InvalidInput(
            "a matchup needs two different songs".to_string(),
        ));
    }

    votes::insert_skip(pool, song_a_id, song_b_id).await?;

    info!(song_a_id, song_b_id, "Recorded skipped matchup");

    Ok(())
}

//! Vote-log database operations
//!
//! Vote rows are append-only. Decided matches are written by the engine
//! inside its rating-update transaction; only skips and reads live here.

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use trackduel_common::db::models::VoteRecord;
use trackduel_common::Result;

fn vote_from_row(row: &SqliteRow) -> VoteRecord {
    VoteRecord {
        id: row.get("id"),
        song_a_id: row.get("song_a_id"),
        song_b_id: row.get("song_b_id"),
        winner_id: row.get("winner_id"),
        created_at: row.get("created_at"),
    }
}

/// Record a skipped matchup
///
/// The two ids are stored without any implied ranking and no rating changes.
pub async fn insert_skip(pool: &SqlitePool, song_a_id: i64, song_b_id: i64) -> Result<()> {
    sqlx::query("INSERT INTO votes (song_a_id, song_b_id, winner_id) VALUES (?, ?, NULL)")
        .bind(song_a_id)
        .bind(song_b_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// List the most recent vote-log entries, newest first
pub async fn recent_votes(pool: &SqlitePool, limit: i64) -> Result<Vec<VoteRecord>> {
    let rows = sqlx::query(
        r#"
        SELECT id, song_a_id, song_b_id, winner_id, created_at
        FROM votes
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(vote_from_row).collect())
}

/// Count vote-log entries
pub async fn count_votes(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM votes")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::songs::{insert_song, NewSong};
    use trackduel_common::db::init_schema;

    async fn pool_with_two_songs() -> (SqlitePool, i64, i64) {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await.unwrap();
        init_schema(&pool).await.expect("Failed to initialize schema");

        let mut ids = Vec::new();
        for title in ["One", "Two"] {
            let song = insert_song(
                &pool,
                &NewSong {
                    title: title.to_string(),
                    artist: "Band".to_string(),
                    album: None,
                    release_year: None,
                },
            )
            .await
            .unwrap();
            ids.push(song.id);
        }

        (pool, ids[0], ids[1])
    }

    #[tokio::test]
    async fn skip_writes_row_with_null_winner() {
        let (pool, a, b) = pool_with_two_songs().await;

        insert_skip(&pool, a, b).await.expect("Failed to insert skip");

        let votes = recent_votes(&pool, 10).await.unwrap();
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].song_a_id, a);
        assert_eq!(votes[0].song_b_id, b);
        assert_eq!(votes[0].winner_id, None);
    }

    #[tokio::test]
    async fn recent_votes_newest_first() {
        let (pool, a, b) = pool_with_two_songs().await;

        insert_skip(&pool, a, b).await.unwrap();
        insert_skip(&pool, b, a).await.unwrap();

        let votes = recent_votes(&pool, 10).await.unwrap();
        assert_eq!(votes.len(), 2);
        assert!(votes[0].id > votes[1].id);
        assert_eq!(votes[0].song_a_id, b);
    }

    #[tokio::test]
    async fn skip_rejects_identical_songs() {
        let (pool, a, _) = pool_with_two_songs().await;

        // The CHECK constraint rejects a matchup of a song against itself.
        let result = insert_skip(&pool, a, a).await;
        assert!(result.is_err());
        assert_eq!(count_votes(&pool).await.unwrap(), 0);
    }
}

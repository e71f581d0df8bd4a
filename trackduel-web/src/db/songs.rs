//! Song database operations

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use trackduel_common::db::models::Song;
use trackduel_common::{Error, Result};

const SONG_COLUMNS: &str = "id, title, artist, album, release_year, rating, \
                            artwork_url, genre, duration_seconds";

/// Fields for a song about to be added to the catalog
///
/// The rating is not part of this - new songs always start at the default.
#[derive(Debug, Clone)]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub release_year: Option<i64>,
}

fn song_from_row(row: &SqliteRow) -> Song {
    Song {
        id: row.get("id"),
        title: row.get("title"),
        artist: row.get("artist"),
        album: row.get("album"),
        release_year: row.get("release_year"),
        rating: row.get("rating"),
        artwork_url: row.get("artwork_url"),
        genre: row.get("genre"),
        duration_seconds: row.get("duration_seconds"),
    }
}

/// Load a song by id
pub async fn get_song(pool: &SqlitePool, id: i64) -> Result<Option<Song>> {
    let row = sqlx::query(&format!("SELECT {} FROM songs WHERE id = ?", SONG_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(song_from_row))
}

/// List the top `limit` songs ordered by rating descending
///
/// Ties sort by id so iteration order is stable across calls.
pub async fn list_top_rated(pool: &SqlitePool, limit: i64) -> Result<Vec<Song>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM songs ORDER BY rating DESC, id ASC LIMIT ?",
        SONG_COLUMNS
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(song_from_row).collect())
}

/// List the whole catalog ordered by rating descending
pub async fn list_all_by_rating(pool: &SqlitePool) -> Result<Vec<Song>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM songs ORDER BY rating DESC, id ASC",
        SONG_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(song_from_row).collect())
}

/// Insert a new song with the default rating and return it
pub async fn insert_song(pool: &SqlitePool, new_song: &NewSong) -> Result<Song> {
    let result = sqlx::query(
        r#"
        INSERT INTO songs (title, artist, album, release_year)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&new_song.title)
    .bind(&new_song.artist)
    .bind(&new_song.album)
    .bind(new_song.release_year)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();

    get_song(pool, id)
        .await?
        .ok_or_else(|| Error::Internal(format!("inserted song {} not found", id)))
}

//! Database initialization
//!
//! Creates the database file on first run and brings the schema up to date.
//! All statements are idempotent (`CREATE TABLE IF NOT EXISTS`), so calling
//! this on every startup is safe.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::{info, warn};

/// Open (or create) the database and initialize the schema
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers (pairing selection) with one writer
    // (vote transactions).
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Create tables, indexes, and default settings
///
/// Exposed separately so tests can run the schema against an in-memory pool.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    create_songs_table(pool).await?;
    create_votes_table(pool).await?;
    create_settings_table(pool).await?;
    init_default_settings(pool).await?;

    Ok(())
}

/// Create the songs table
///
/// `rating` defaults to 1500 and is mutated only by the vote-processing
/// transaction. Title and artist are required and bounded.
pub async fn create_songs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            artist TEXT NOT NULL,
            album TEXT,
            release_year INTEGER,
            rating REAL NOT NULL DEFAULT 1500.0,
            artwork_url TEXT,
            genre TEXT,
            duration_seconds INTEGER,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (length(title) > 0 AND length(title) <= 200),
            CHECK (length(artist) > 0 AND length(artist) <= 200),
            CHECK (release_year IS NULL OR (release_year >= 1000 AND release_year <= 9999)),
            CHECK (duration_seconds IS NULL OR duration_seconds > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_rating ON songs(rating)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the votes table
///
/// One row per submitted matchup outcome. `winner_id` is NULL for skips.
/// Rows are never updated or deleted in normal operation.
pub async fn create_votes_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS votes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            song_a_id INTEGER NOT NULL REFERENCES songs(id),
            song_b_id INTEGER NOT NULL REFERENCES songs(id),
            winner_id INTEGER REFERENCES songs(id),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (song_a_id <> song_b_id),
            CHECK (winner_id IS NULL OR winner_id = song_a_id OR winner_id = song_b_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_votes_created_at ON votes(created_at)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_votes_winner ON votes(winner_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the settings table
///
/// Stores application configuration key-value pairs.
pub async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Initialize or repair default settings
async fn init_default_settings(pool: &SqlitePool) -> Result<()> {
    // Candidate-pool cap for pairing selection
    ensure_setting(pool, "pairing_pool_size", "100").await?;

    // Rating window for the 0-5 star display transform
    ensure_setting(pool, "stars_window_min", "1000").await?;
    ensure_setting(pool, "stars_window_max", "1600").await?;

    Ok(())
}

/// Ensure a setting exists with the specified default value
///
/// Missing settings are created; settings holding NULL are reset to the
/// default. Existing non-NULL values are left alone.
pub async fn ensure_setting(pool: &SqlitePool, key: &str, default_value: &str) -> Result<()> {
    // INSERT OR IGNORE handles concurrent initialization races.
    let inserted = sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES (?, ?)")
        .bind(key)
        .bind(default_value)
        .execute(pool)
        .await?;

    if inserted.rows_affected() > 0 {
        info!("Initialized setting '{}' with default value: {}", key, default_value);
        return Ok(());
    }

    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_one(pool)
        .await?;

    if value.is_none() {
        sqlx::query("UPDATE settings SET value = ? WHERE key = ?")
            .bind(default_value)
            .bind(key)
            .execute(pool)
            .await?;

        warn!("Setting '{}' was NULL, reset to default: {}", key, default_value);
    }

    Ok(())
}

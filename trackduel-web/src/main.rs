//! trackduel-web - song-ranking web service
//!
//! Serves the matchup and rankings JSON API over a SQLite store. Songs are
//! paired head-to-head by rating proximity; decided votes update ratings
//! with an Elo-style algorithm.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use trackduel_common::config::{database_path, resolve_root_folder};
use trackduel_common::db::init_database;
use trackduel_web::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "trackduel-web", version, about = "Song-ranking web service")]
struct Args {
    /// Data folder holding the database (overrides TRACKDUEL_ROOT and the
    /// config file)
    #[arg(long)]
    root_folder: Option<String>,

    /// Port to listen on
    #[arg(long, env = "TRACKDUEL_PORT", default_value_t = 5730)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting TrackDuel web service v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), "TRACKDUEL_ROOT")?;
    let db_path = database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path).await?;

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("trackduel-web listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}

//! Matchup selection
//!
//! Picks a uniformly random pivot from the top-rated candidate pool, then
//! the pool song with the numerically closest rating as its opponent.
//! Similar ratings make the vote maximally informative.

use rand::Rng;
use sqlx::SqlitePool;
use trackduel_common::db::models::Song;
use trackduel_common::Result;

use crate::db::{settings, songs};

/// Candidate-pool cap used when the `pairing_pool_size` setting is absent
pub const DEFAULT_POOL_SIZE: i64 = 100;

/// Select the next matchup from the catalog
///
/// Returns `None` when fewer than two songs are available - a valid
/// terminal state, not an error. Read-only; tolerates stale rating
/// snapshots under concurrent votes.
pub async fn next_pairing(pool: &SqlitePool) -> Result<Option<(Song, Song)>> {
    let pool_size = settings::get_setting_i64(pool, "pairing_pool_size")
        .await?
        .unwrap_or(DEFAULT_POOL_SIZE)
        .max(2);

    let candidates = songs::list_top_rated(pool, pool_size).await?;

    Ok(select_matchup(&candidates))
}

/// Pure selection over a pre-fetched candidate pool
///
/// The opponent is the non-pivot candidate with the smallest absolute
/// rating gap to the pivot; ties go to the first one encountered in pool
/// iteration order. Returns `(pivot, opponent)`.
pub fn select_matchup(candidates: &[Song]) -> Option<(Song, Song)> {
    if candidates.len() < 2 {
        return None;
    }

    let mut rng = rand::thread_rng();
    let pivot_idx = rng.gen_range(0..candidates.len());
    let pivot = &candidates[pivot_idx];

    let mut opponent: Option<&Song> = None;
    let mut best_gap = f64::INFINITY;

    for (idx, candidate) in candidates.iter().enumerate() {
        if idx == pivot_idx {
            continue;
        }
        let gap = (candidate.rating - pivot.rating).abs();
        if gap < best_gap {
            best_gap = gap;
            opponent = Some(candidate);
        }
    }

    opponent.map(|opp| (pivot.clone(), opp.clone()))
}

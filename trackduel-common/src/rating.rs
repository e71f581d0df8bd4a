//! Elo rating math for head-to-head song matchups
//!
//! Pure functions only - no database or HTTP dependencies. The web service
//! reads current ratings from the store, runs these calculations, and writes
//! the results back inside a single transaction.

/// Rating assigned to every newly added song
pub const DEFAULT_RATING: f64 = 1500.0;

/// Default display window lower bound (maps to 0 stars)
pub const STARS_WINDOW_MIN: f64 = 1000.0;

/// Default display window upper bound (maps to 5 stars)
pub const STARS_WINDOW_MAX: f64 = 1600.0;

/// Expected score for a song against an opponent
///
/// Standard Elo logistic curve: `1 / (1 + 10^((opponent - own) / 400))`.
/// Symmetric, so `expected_score(a, b) + expected_score(b, a) == 1.0`.
pub fn expected_score(own: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((opponent - own) / 400.0))
}

/// Maximum rating swing per match, tapered for highly-rated songs
///
/// - rating < 2100: K = 32
/// - 2100 <= rating < 2400: K = 24
/// - rating >= 2400: K = 16
pub fn k_factor(rating: f64) -> f64 {
    if rating < 2100.0 {
        32.0
    } else if rating < 2400.0 {
        24.0
    } else {
        16.0
    }
}

/// New ratings for a decided match
///
/// Each side uses its own K-factor. Returns `(new_winner_rating,
/// new_loser_rating)`. No rounding - stored ratings stay full precision.
pub fn updated_ratings(winner_rating: f64, loser_rating: f64) -> (f64, f64) {
    let expected_winner = expected_score(winner_rating, loser_rating);
    let expected_loser = expected_score(loser_rating, winner_rating);

    let new_winner = winner_rating + k_factor(winner_rating) * (1.0 - expected_winner);
    let new_loser = loser_rating + k_factor(loser_rating) * (0.0 - expected_loser);

    (new_winner, new_loser)
}

/// Map a raw rating onto the 0-5 star display scale (default window)
pub fn stars(rating: f64) -> f64 {
    stars_in_window(rating, STARS_WINDOW_MIN, STARS_WINDOW_MAX)
}

/// Map a raw rating onto the 0-5 star display scale
///
/// Clamps the rating into `[min, max]`, rescales linearly into `[0, 5]`,
/// and rounds to one decimal place. Display-only; stored ratings are never
/// rounded.
pub fn stars_in_window(rating: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span <= 0.0 {
        return 0.0;
    }

    let ratio = (rating.clamp(min, max) - min) / span;
    (ratio * 5.0 * 10.0).round() / 10.0
}

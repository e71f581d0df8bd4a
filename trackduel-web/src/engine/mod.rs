//! The matchup engine: pairing selection and vote processing
//!
//! Stateless between calls - all persistent state lives in the song and
//! vote tables. Pairing selection is a pure read; vote processing for a
//! decided match runs inside a single transaction.

pub mod pairing;
pub mod vote;

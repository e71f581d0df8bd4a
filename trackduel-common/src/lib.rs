//! # TrackDuel Common Library
//!
//! Shared code for the TrackDuel service:
//! - Database initialization and models
//! - Rating math (expected score, K-factor, display transform)
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod db;
pub mod error;
pub mod rating;

pub use error::{Error, Result};
pub use rating::DEFAULT_RATING;

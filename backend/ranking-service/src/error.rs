//! Error types for the ranking core
//!
//! The core performs no I/O and validates no business identifiers, so the
//! only failures it owns are parse-level. Errors raised by a
//! [`crate::services::ContentSource`] implementation propagate to the caller
//! unmodified as `anyhow::Error`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankingError {
    #[error("invalid time window: {0}")]
    InvalidTimeWindow(String),

    #[error("invalid feed mode: {0}")]
    InvalidFeedMode(String),
}

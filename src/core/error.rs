//! Error taxonomy for the round engine.
//!
//! Only two kinds of failure are fatal, and both happen before the first
//! round exists: a catalog too small for the chosen mode
//! (`ContentExhaustion`) and bad configuration. Everything raised
//! mid-round is recoverable:
//!
//! - `InvalidTransition`: an operation on a terminal round. Callers ignore it.
//! - `MalformedGuess`: a payload of the wrong shape. The engine counts it
//!   as an incorrect submission and never surfaces it as an `Err`.

use thiserror::Error;

use crate::modes::GameMode;
use crate::round::{RoundId, RoundStatus};

/// Errors produced by the quiz engine.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Operation attempted on a round that already reached a terminal status.
    #[error("invalid transition: {round} is already {status}")]
    InvalidTransition { round: RoundId, status: RoundStatus },

    /// The catalog cannot supply enough distinct countries for a mode.
    #[error("{mode} needs at least {required} distinct countries, catalog has {available}")]
    ContentExhaustion {
        mode: GameMode,
        required: usize,
        available: usize,
    },

    /// Guess payload has the wrong shape for the active mode.
    #[error("malformed guess for {mode}: expected {expected}")]
    MalformedGuess {
        mode: GameMode,
        expected: &'static str,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown country code `{0}`")]
    UnknownCountry(String),

    /// `TokioCountdown` was requested outside a tokio runtime.
    #[error("no tokio runtime available to drive the countdown")]
    NoRuntime,

    #[error("quiz session has shut down")]
    SessionClosed,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QuizError>;

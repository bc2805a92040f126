//! Core building blocks shared by every mode: errors, RNG, configuration.
//!
//! Nothing in here knows about a particular mode. Modes and the round
//! engine are configured through `RoundConfig` rather than hardcoded values.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{
    RoundConfig, ADVANCED_CARD_COUNT, DEFAULT_ATTEMPTS, DEFAULT_COUNTDOWN_SECONDS,
    PICK_FLAG_CHOICES,
};
pub use error::{QuizError, Result};
pub use rng::QuizRng;

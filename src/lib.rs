//! # flag-quiz
//!
//! Round engine for flag-identification quiz games.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: The engine never renders anything. It hands
//!    out immutable `RoundState` snapshots and accepts three operations:
//!    `submit_guess`, `tick`, and `request_next`.
//!
//! 2. **One Engine, Four Modes**: Attempts, countdown, and lifecycle live
//!    in a single `RoundEngine`. Mode rules plug in through `ModeStrategy`.
//!
//! 3. **Deterministic**: Given a seed, the same rounds come out in the same
//!    order. Countdowns can be driven by hand for tests.
//!
//! ## Modules
//!
//! - `core`: Errors, RNG, round configuration
//! - `catalog`: Country lookup table
//! - `countdown`: Cancellable ticking clocks
//! - `modes`: The four mode strategies
//! - `round`: Round state and the engine state machine
//! - `session`: Async driver running an engine on tokio
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use flag_quiz::{CountryCatalog, GameMode, Guess, ManualCountdown, RoundConfig, RoundEngine, RoundStatus};
//!
//! let catalog = Arc::new(CountryCatalog::from_json_str(r#"{"TD": "Chad"}"#).unwrap());
//! let clock = ManualCountdown::new();
//! let mut engine = RoundEngine::builder(GameMode::LetterHint.strategy(), catalog)
//!     .config(RoundConfig::new(3).timed(10))
//!     .countdown(clock.clone())
//!     .seed(1)
//!     .build()
//!     .unwrap();
//!
//! engine.submit_guess(&Guess::letter("a")).unwrap();
//! assert_eq!(engine.round().status, RoundStatus::Active);
//!
//! clock.advance_by(10);
//! engine.process_ticks();
//! assert_eq!(engine.round().status, RoundStatus::Expired);
//! ```

pub mod catalog;
pub mod core;
pub mod countdown;
pub mod modes;
pub mod round;
pub mod session;

// Re-export commonly used types
pub use crate::core::{QuizError, QuizRng, Result, RoundConfig};

pub use crate::catalog::{Country, CountryCatalog};

pub use crate::countdown::{CancelHandle, Countdown, ManualCountdown, Tick, TokioCountdown};

pub use crate::modes::{Evaluation, GameMode, Guess, ModeStrategy};

pub use crate::round::{
    GuessOutcome, RoundContent, RoundEngine, RoundEngineBuilder, RoundId, RoundState, RoundStatus,
    TickOutcome,
};

pub use crate::session::{spawn_session, SessionHandle};

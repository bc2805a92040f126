//! Round lifecycle.
//!
//! A round starts `Active` and ends in exactly one terminal status:
//!
//! ```text
//!            submit_guess (solved)
//!          ┌──────────────────────────► Correct
//!          │ submit_guess (budget spent)
//! Active ──┼──────────────────────────► Incorrect
//!          │ tick(0)
//!          └──────────────────────────► Expired
//! ```
//!
//! Terminal rounds are never mutated again; `request_next` replaces them
//! wholesale with a fresh round.

pub mod engine;
pub mod state;
pub mod transition;

pub use engine::{GuessOutcome, RoundEngine, RoundEngineBuilder, TickOutcome};
pub use state::{CountdownState, RoundContent, RoundId, RoundState, RoundStatus};
pub use transition::{step, Step};

//! Round state: the read-only snapshot handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::catalog::Country;
use crate::core::RoundConfig;
use crate::modes::{GameMode, LetterHintContent, MultiCardContent, PickFlagContent, TypeCountryContent};

/// Round identifier, unique within an engine.
///
/// Ticks carry the id of the round that started their countdown, so a
/// tick from a replaced round can be told apart and dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoundId(pub u64);

impl RoundId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Round({})", self.0)
    }
}

/// Lifecycle status. Everything but `Active` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    Active,
    Correct,
    Incorrect,
    /// Countdown reached zero while the round was still active.
    Expired,
}

impl RoundStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, RoundStatus::Active)
    }
}

impl std::fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoundStatus::Active => "active",
            RoundStatus::Correct => "correct",
            RoundStatus::Incorrect => "incorrect",
            RoundStatus::Expired => "expired",
        };
        f.write_str(name)
    }
}

/// Countdown as seen by the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownState {
    pub remaining: u32,
    pub running: bool,
}

impl CountdownState {
    #[must_use]
    pub const fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            running: true,
        }
    }

    /// Record a tick. `remaining` never goes back up.
    ///
    /// Returns `true` once zero is reached; the countdown stops itself.
    pub fn apply_tick(&mut self, remaining: u32) -> bool {
        self.remaining = self.remaining.min(remaining);
        if self.remaining == 0 {
            self.running = false;
        }
        self.remaining == 0
    }
}

/// Mode-specific content and partial progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RoundContent {
    PickFlag(PickFlagContent),
    TypeCountry(TypeCountryContent),
    LetterHint(LetterHintContent),
    AdvancedMultiCard(MultiCardContent),
}

impl RoundContent {
    #[must_use]
    pub fn mode(&self) -> GameMode {
        match self {
            RoundContent::PickFlag(_) => GameMode::PickFlag,
            RoundContent::TypeCountry(_) => GameMode::TypeCountry,
            RoundContent::LetterHint(_) => GameMode::LetterHint,
            RoundContent::AdvancedMultiCard(_) => GameMode::AdvancedMultiCard,
        }
    }

    /// The country (or countries, in advanced mode) to be identified.
    #[must_use]
    pub fn targets(&self) -> Vec<&Country> {
        match self {
            RoundContent::PickFlag(c) => vec![&c.target],
            RoundContent::TypeCountry(c) => vec![&c.target],
            RoundContent::LetterHint(c) => vec![&c.target],
            RoundContent::AdvancedMultiCard(c) => c.cards.iter().map(|card| &card.target).collect(),
        }
    }

    /// Has the answer been exposed to the player?
    #[must_use]
    pub fn answer_revealed(&self) -> bool {
        match self {
            RoundContent::PickFlag(c) => c.answer_revealed,
            RoundContent::TypeCountry(c) => c.answer_revealed,
            RoundContent::LetterHint(c) => c.answer_revealed,
            RoundContent::AdvancedMultiCard(c) => c.answer_revealed,
        }
    }
}

/// Complete state of one round.
///
/// The engine hands out shared references and clones only; a terminal
/// round is never modified again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub id: RoundId,
    pub status: RoundStatus,
    pub attempts_left: u32,
    pub attempt_max: u32,
    /// `None` for untimed rounds.
    pub countdown: Option<CountdownState>,
    pub content: RoundContent,
}

impl RoundState {
    /// A fresh, active round.
    #[must_use]
    pub fn new(id: RoundId, config: &RoundConfig, content: RoundContent) -> Self {
        Self {
            id,
            status: RoundStatus::Active,
            attempts_left: config.attempt_max,
            attempt_max: config.attempt_max,
            countdown: config.timed_seconds.map(CountdownState::new),
            content,
        }
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.content.mode()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == RoundStatus::Active
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    #[must_use]
    pub fn targets(&self) -> Vec<&Country> {
        self.content.targets()
    }

    /// Seconds left, if timed.
    #[must_use]
    pub fn remaining_seconds(&self) -> Option<u32> {
        self.countdown.map(|c| c.remaining)
    }
}

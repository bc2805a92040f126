//! Round configuration.
//!
//! Every round is created from a `RoundConfig`:
//! - `attempt_max`: incorrect submissions tolerated before the round is lost
//! - `timed_seconds`: countdown length, or `None` for an untimed round
//!
//! The countdown-mode toggle lives outside any round. Flipping it only
//! changes the config the *next* round is created with.

use serde::{Deserialize, Serialize};

use super::error::{QuizError, Result};

/// Attempt budget used by every mode.
pub const DEFAULT_ATTEMPTS: u32 = 3;

/// Countdown length when countdown mode is on.
pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 10;

/// Number of flags offered in pick-the-flag.
pub const PICK_FLAG_CHOICES: usize = 3;

/// Number of cards in the advanced mode.
pub const ADVANCED_CARD_COUNT: usize = 3;

/// Configuration for a single round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Starting attempt budget (>= 1).
    pub attempt_max: u32,

    /// Countdown length in seconds. `None` for untimed rounds.
    #[serde(default)]
    pub timed_seconds: Option<u32>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            attempt_max: DEFAULT_ATTEMPTS,
            timed_seconds: None,
        }
    }
}

impl RoundConfig {
    /// Create an untimed configuration with the given attempt budget.
    #[must_use]
    pub const fn new(attempt_max: u32) -> Self {
        Self {
            attempt_max,
            timed_seconds: None,
        }
    }

    /// Attach a countdown of `seconds`.
    #[must_use]
    pub const fn timed(mut self, seconds: u32) -> Self {
        self.timed_seconds = Some(seconds);
        self
    }

    /// Remove the countdown.
    #[must_use]
    pub const fn untimed(mut self) -> Self {
        self.timed_seconds = None;
        self
    }

    /// Apply the countdown-mode toggle: on gives the default countdown, off none.
    #[must_use]
    pub const fn with_countdown_mode(self, enabled: bool) -> Self {
        if enabled {
            self.timed(DEFAULT_COUNTDOWN_SECONDS)
        } else {
            self.untimed()
        }
    }

    /// Is a countdown attached?
    #[must_use]
    pub const fn is_timed(&self) -> bool {
        self.timed_seconds.is_some()
    }

    /// Check the config can produce a playable round.
    pub fn validate(&self) -> Result<()> {
        if self.attempt_max == 0 {
            return Err(QuizError::InvalidConfig(
                "attempt_max must be at least 1".to_string(),
            ));
        }
        if self.timed_seconds == Some(0) {
            return Err(QuizError::InvalidConfig(
                "timed_seconds must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a config from JSON.
    ///
    /// ```
    /// use flag_quiz::core::RoundConfig;
    ///
    /// let config = RoundConfig::from_json_str(r#"{"attempt_max": 5, "timed_seconds": 30}"#).unwrap();
    /// assert_eq!(config, RoundConfig::new(5).timed(30));
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

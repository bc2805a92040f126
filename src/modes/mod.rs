//! Game modes and their rule sets.
//!
//! Each mode implements [`ModeStrategy`]:
//! - `initialize`: pick the round's target(s) from the catalog
//! - `evaluate`: judge one guess and record partial progress
//! - `reveal_answer`: expose the answer once the round is lost
//!
//! The round engine owns attempts, countdown, and status. Strategies only
//! see the mode-specific [`RoundContent`].

mod letter_hint;
mod multi_card;
mod pick_flag;
mod type_country;

pub use letter_hint::{LetterHintContent, LetterHintStrategy, HIDDEN_LETTER};
pub use multi_card::{AdvancedMultiCardStrategy, CardState, MultiCardContent};
pub use pick_flag::{PickFlagContent, PickFlagStrategy};
pub use type_country::{TypeCountryContent, TypeCountryStrategy};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::CountryCatalog;
use crate::core::{QuizError, QuizRng, Result};
use crate::round::RoundContent;

/// The four quiz modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Pick the named country's flag out of three.
    #[serde(rename = "pick-the-flag")]
    PickFlag,
    /// Type the name of the country whose flag is shown.
    #[serde(rename = "type-the-country")]
    TypeCountry,
    /// Guess the hidden country name letter by letter.
    #[serde(rename = "letter-hint")]
    LetterHint,
    /// Name three flags at once.
    #[serde(rename = "advanced")]
    AdvancedMultiCard,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::PickFlag,
        GameMode::TypeCountry,
        GameMode::LetterHint,
        GameMode::AdvancedMultiCard,
    ];

    /// The strategy implementing this mode.
    #[must_use]
    pub fn strategy(self) -> Arc<dyn ModeStrategy> {
        match self {
            GameMode::PickFlag => Arc::new(PickFlagStrategy),
            GameMode::TypeCountry => Arc::new(TypeCountryStrategy),
            GameMode::LetterHint => Arc::new(LetterHintStrategy),
            GameMode::AdvancedMultiCard => Arc::new(AdvancedMultiCardStrategy),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GameMode::PickFlag => "pick-the-flag",
            GameMode::TypeCountry => "type-the-country",
            GameMode::LetterHint => "letter-hint",
            GameMode::AdvancedMultiCard => "advanced",
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A player's submission. Each mode accepts exactly one variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Guess {
    /// Country code of the picked flag (pick-the-flag).
    Choice(String),
    /// Typed country name (type-the-country).
    Text(String),
    /// A single letter (letter-hint).
    Letter(String),
    /// One typed name per card, in card order (advanced).
    Cards(Vec<String>),
}

impl Guess {
    pub fn choice(code: impl Into<String>) -> Self {
        Guess::Choice(code.into())
    }

    pub fn text(name: impl Into<String>) -> Self {
        Guess::Text(name.into())
    }

    pub fn letter(letter: impl Into<String>) -> Self {
        Guess::Letter(letter.into())
    }

    pub fn cards<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Guess::Cards(names.into_iter().map(Into::into).collect())
    }
}

/// Verdict on one guess.
///
/// | correct | fully_resolved | engine effect                      |
/// |---------|----------------|------------------------------------|
/// | true    | true           | round is won                       |
/// | true    | false          | progress, no attempt consumed      |
/// | false   | any            | one attempt consumed               |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub correct: bool,
    pub fully_resolved: bool,
}

impl Evaluation {
    /// The guess settles the round in the player's favour.
    #[must_use]
    pub const fn solved() -> Self {
        Self {
            correct: true,
            fully_resolved: true,
        }
    }

    /// The guess was right but the puzzle is not finished yet.
    #[must_use]
    pub const fn progress() -> Self {
        Self {
            correct: true,
            fully_resolved: false,
        }
    }

    /// The guess was wrong (or only partly right).
    #[must_use]
    pub const fn miss() -> Self {
        Self {
            correct: false,
            fully_resolved: false,
        }
    }

    /// A single-shot verdict: right answers resolve, wrong ones miss.
    #[must_use]
    pub const fn single_shot(correct: bool) -> Self {
        Self {
            correct,
            fully_resolved: true,
        }
    }
}

/// Rule set for one game mode.
///
/// Implementations must be deterministic given the RNG, and `evaluate`
/// must leave the content untouched when it returns an error.
pub trait ModeStrategy: Send + Sync {
    /// The mode this strategy implements.
    fn mode(&self) -> GameMode;

    /// Fewest distinct catalog entries needed to build a round.
    fn required_countries(&self) -> usize {
        1
    }

    /// Build the content of a fresh round.
    fn initialize(&self, catalog: &CountryCatalog, rng: &mut QuizRng) -> Result<RoundContent>;

    /// Judge a guess, updating partial progress in `content`.
    ///
    /// Returns `MalformedGuess` for a payload of the wrong shape.
    fn evaluate(&self, content: &mut RoundContent, guess: &Guess) -> Result<Evaluation>;

    /// Expose the answer after the round is lost or expires.
    fn reveal_answer(&self, content: &mut RoundContent);

    // === Convenience Methods ===

    /// Fail fast if the catalog cannot supply a round.
    fn check_capacity(&self, catalog: &CountryCatalog) -> Result<()> {
        let required = self.required_countries();
        if catalog.len() < required {
            return Err(QuizError::ContentExhaustion {
                mode: self.mode(),
                required,
                available: catalog.len(),
            });
        }
        Ok(())
    }

    /// Error for a guess of the wrong shape.
    fn malformed(&self, expected: &'static str) -> QuizError {
        QuizError::MalformedGuess {
            mode: self.mode(),
            expected,
        }
    }
}

/// Error for content that belongs to a different mode.
pub(crate) fn foreign_content(mode: GameMode, content: &RoundContent) -> QuizError {
    QuizError::InvalidConfig(format!(
        "{} strategy was handed {} round content",
        mode,
        content.mode()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names() {
        assert_eq!(GameMode::PickFlag.to_string(), "pick-the-flag");
        assert_eq!(GameMode::AdvancedMultiCard.to_string(), "advanced");

        let json = serde_json::to_string(&GameMode::LetterHint).unwrap();
        assert_eq!(json, "\"letter-hint\"");
    }

    #[test]
    fn test_strategy_for_each_mode() {
        for mode in GameMode::ALL {
            assert_eq!(mode.strategy().mode(), mode);
        }
    }

    #[test]
    fn test_guess_serde_shape() {
        let json = serde_json::to_string(&Guess::letter("a")).unwrap();
        assert_eq!(json, r#"{"kind":"letter","value":"a"}"#);

        let guess: Guess = serde_json::from_str(r#"{"kind":"cards","value":["a","b"]}"#).unwrap();
        assert_eq!(guess, Guess::cards(["a", "b"]));
    }

    #[test]
    fn test_check_capacity() {
        let catalog = CountryCatalog::from_pairs([("fr", "France"), ("de", "Germany")]).unwrap();

        assert!(TypeCountryStrategy.check_capacity(&catalog).is_ok());

        let err = PickFlagStrategy.check_capacity(&catalog).unwrap_err();
        assert!(matches!(
            err,
            QuizError::ContentExhaustion { mode: GameMode::PickFlag, required: 3, available: 2 }
        ));
    }
}

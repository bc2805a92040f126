//! Type-the-country: a flag is shown, the player types its name.

use serde::{Deserialize, Serialize};

use super::{foreign_content, Evaluation, GameMode, Guess, ModeStrategy};
use crate::catalog::{Country, CountryCatalog};
use crate::core::{QuizError, QuizRng, Result};
use crate::round::RoundContent;

/// Round content for type-the-country.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCountryContent {
    pub target: Country,
    /// Text of the most recent submission, as typed.
    pub last_guess: Option<String>,
    pub answer_revealed: bool,
}

/// Single random country; answers compared trimmed and case-insensitively.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeCountryStrategy;

impl ModeStrategy for TypeCountryStrategy {
    fn mode(&self) -> GameMode {
        GameMode::TypeCountry
    }

    fn initialize(&self, catalog: &CountryCatalog, rng: &mut QuizRng) -> Result<RoundContent> {
        let target = catalog
            .random_entry(rng)
            .ok_or_else(|| QuizError::ContentExhaustion {
                mode: self.mode(),
                required: self.required_countries(),
                available: 0,
            })?;

        Ok(RoundContent::TypeCountry(TypeCountryContent {
            target,
            last_guess: None,
            answer_revealed: false,
        }))
    }

    fn evaluate(&self, content: &mut RoundContent, guess: &Guess) -> Result<Evaluation> {
        let RoundContent::TypeCountry(content) = content else {
            return Err(foreign_content(self.mode(), content));
        };
        let Guess::Text(text) = guess else {
            return Err(self.malformed("a country name"));
        };

        let correct = content.target.matches_name(text);
        content.last_guess = Some(text.clone());
        Ok(Evaluation::single_shot(correct))
    }

    fn reveal_answer(&self, content: &mut RoundContent) {
        if let RoundContent::TypeCountry(content) = content {
            content.answer_revealed = true;
        }
    }
}

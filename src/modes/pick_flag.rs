//! Pick-the-flag: the country name is shown, the player picks its flag.

use serde::{Deserialize, Serialize};

use super::{foreign_content, Evaluation, GameMode, Guess, ModeStrategy};
use crate::catalog::{Country, CountryCatalog};
use crate::core::{QuizError, QuizRng, Result, PICK_FLAG_CHOICES};
use crate::round::RoundContent;

/// Round content for pick-the-flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickFlagContent {
    pub target: Country,
    /// Flag codes on offer, shuffled. Exactly one is `target.code`.
    pub choices: Vec<String>,
    /// Most recent pick.
    pub selected: Option<String>,
    pub answer_revealed: bool,
}

/// One target plus two distinct distractors, shuffled.
#[derive(Clone, Copy, Debug, Default)]
pub struct PickFlagStrategy;

impl ModeStrategy for PickFlagStrategy {
    fn mode(&self) -> GameMode {
        GameMode::PickFlag
    }

    fn required_countries(&self) -> usize {
        PICK_FLAG_CHOICES
    }

    fn initialize(&self, catalog: &CountryCatalog, rng: &mut QuizRng) -> Result<RoundContent> {
        self.check_capacity(catalog)?;

        // distinct_entries comes back in random order; the first is the target
        let picked = catalog.distinct_entries(PICK_FLAG_CHOICES, rng)?;
        let target = picked.first().cloned().ok_or(QuizError::ContentExhaustion {
            mode: self.mode(),
            required: PICK_FLAG_CHOICES,
            available: catalog.len(),
        })?;
        let mut choices: Vec<String> = picked.into_iter().map(|c| c.code).collect();
        rng.shuffle(&mut choices);

        Ok(RoundContent::PickFlag(PickFlagContent {
            target,
            choices,
            selected: None,
            answer_revealed: false,
        }))
    }

    fn evaluate(&self, content: &mut RoundContent, guess: &Guess) -> Result<Evaluation> {
        let RoundContent::PickFlag(content) = content else {
            return Err(foreign_content(self.mode(), content));
        };
        let Guess::Choice(code) = guess else {
            return Err(self.malformed("a flag choice"));
        };

        let code = code.trim().to_lowercase();
        if !content.choices.contains(&code) {
            return Err(self.malformed("one of the offered flags"));
        }

        let correct = code == content.target.code;
        content.selected = Some(code);
        Ok(Evaluation::single_shot(correct))
    }

    fn reveal_answer(&self, content: &mut RoundContent) {
        if let RoundContent::PickFlag(content) = content {
            content.answer_revealed = true;
        }
    }
}

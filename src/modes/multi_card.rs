//! Advanced: three flags named at once, sharing one attempt budget.
//!
//! Every submit carries one answer per card and costs at most one
//! attempt, however many cards are wrong. A card answered correctly is
//! locked; later input for it is ignored.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{foreign_content, Evaluation, GameMode, Guess, ModeStrategy};
use crate::catalog::{Country, CountryCatalog};
use crate::core::{QuizRng, Result, ADVANCED_CARD_COUNT};
use crate::round::RoundContent;

/// One card of the advanced mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardState {
    pub target: Country,
    pub last_guess: Option<String>,
    /// Locked once true.
    pub correct: bool,
    /// Set on reveal for cards that were never answered correctly.
    pub answer_shown: bool,
}

impl CardState {
    fn new(target: Country) -> Self {
        Self {
            target,
            last_guess: None,
            correct: false,
            answer_shown: false,
        }
    }

    fn evaluate(&mut self, answer: &str) {
        if !self.correct {
            self.correct = self.target.matches_name(answer);
            self.last_guess = Some(answer.to_string());
        }
    }
}

/// Round content for the advanced mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiCardContent {
    pub cards: SmallVec<[CardState; ADVANCED_CARD_COUNT]>,
    pub answer_revealed: bool,
}

impl MultiCardContent {
    /// Per-card correctness, in card order.
    #[must_use]
    pub fn card_results(&self) -> Vec<bool> {
        self.cards.iter().map(|card| card.correct).collect()
    }

    #[must_use]
    pub fn all_correct(&self) -> bool {
        self.cards.iter().all(|card| card.correct)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AdvancedMultiCardStrategy;

impl ModeStrategy for AdvancedMultiCardStrategy {
    fn mode(&self) -> GameMode {
        GameMode::AdvancedMultiCard
    }

    fn required_countries(&self) -> usize {
        ADVANCED_CARD_COUNT
    }

    fn initialize(&self, catalog: &CountryCatalog, rng: &mut QuizRng) -> Result<RoundContent> {
        self.check_capacity(catalog)?;

        let cards = catalog
            .distinct_entries(ADVANCED_CARD_COUNT, rng)?
            .into_iter()
            .map(CardState::new)
            .collect();

        Ok(RoundContent::AdvancedMultiCard(MultiCardContent {
            cards,
            answer_revealed: false,
        }))
    }

    fn evaluate(&self, content: &mut RoundContent, guess: &Guess) -> Result<Evaluation> {
        let RoundContent::AdvancedMultiCard(content) = content else {
            return Err(foreign_content(self.mode(), content));
        };
        let Guess::Cards(answers) = guess else {
            return Err(self.malformed("one answer per card"));
        };
        if answers.len() != content.cards.len() {
            return Err(self.malformed("one answer per card"));
        }

        for (card, answer) in content.cards.iter_mut().zip(answers) {
            card.evaluate(answer);
        }

        if content.all_correct() {
            Ok(Evaluation::solved())
        } else {
            Ok(Evaluation::miss())
        }
    }

    fn reveal_answer(&self, content: &mut RoundContent) {
        if let RoundContent::AdvancedMultiCard(content) = content {
            for card in content.cards.iter_mut().filter(|card| !card.correct) {
                card.answer_shown = true;
            }
            content.answer_revealed = true;
        }
    }
}

//! Letter-hint: the country name is hidden, the player reveals it a
//! letter at a time.
//!
//! Only alphabetic characters are hidden; spaces and punctuation are
//! shown from the start. A letter that appears in the name reveals every
//! occurrence and costs nothing. A letter that does not appear costs an
//! attempt. The round is won once nothing is left hidden.

use serde::{Deserialize, Serialize};

use super::{foreign_content, Evaluation, GameMode, Guess, ModeStrategy};
use crate::catalog::{Country, CountryCatalog};
use crate::core::{QuizError, QuizRng, Result};
use crate::round::RoundContent;

/// Placeholder shown for a letter that has not been guessed yet.
pub const HIDDEN_LETTER: char = '_';

/// Round content for letter-hint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterHintContent {
    pub target: Country,
    /// Lower-cased name, one entry per character.
    pub answer: Vec<char>,
    /// `answer` with unguessed letters replaced by [`HIDDEN_LETTER`].
    pub mask: Vec<char>,
    /// Letters submitted so far, in order, without repeats.
    pub guessed: Vec<char>,
    pub answer_revealed: bool,
}

impl LetterHintContent {
    /// Build the initial mask for a country.
    #[must_use]
    pub fn new(target: Country) -> Self {
        let answer: Vec<char> = target.name.to_lowercase().chars().collect();
        let mask = answer
            .iter()
            .map(|&c| if c.is_alphabetic() { HIDDEN_LETTER } else { c })
            .collect();
        Self {
            target,
            answer,
            mask,
            guessed: Vec::new(),
            answer_revealed: false,
        }
    }

    /// The mask as a string, e.g. `"__a_"`.
    #[must_use]
    pub fn masked(&self) -> String {
        self.mask.iter().collect()
    }

    /// The lower-cased answer as a string.
    #[must_use]
    pub fn answer_text(&self) -> String {
        self.answer.iter().collect()
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.mask == self.answer
    }

    /// Uncover every position holding `letter`.
    fn uncover(&mut self, letter: char) {
        for (slot, &actual) in self.mask.iter_mut().zip(&self.answer) {
            if actual == letter {
                *slot = actual;
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LetterHintStrategy;

impl LetterHintStrategy {
    fn parse_letter(&self, raw: &str) -> Result<char> {
        let mut chars = raw.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => Ok(c.to_lowercase().next().unwrap_or(c)),
            _ => Err(self.malformed("a single letter")),
        }
    }
}

impl ModeStrategy for LetterHintStrategy {
    fn mode(&self) -> GameMode {
        GameMode::LetterHint
    }

    fn initialize(&self, catalog: &CountryCatalog, rng: &mut QuizRng) -> Result<RoundContent> {
        let target = catalog
            .random_entry(rng)
            .ok_or_else(|| QuizError::ContentExhaustion {
                mode: self.mode(),
                required: self.required_countries(),
                available: 0,
            })?;

        Ok(RoundContent::LetterHint(LetterHintContent::new(target)))
    }

    fn evaluate(&self, content: &mut RoundContent, guess: &Guess) -> Result<Evaluation> {
        let RoundContent::LetterHint(content) = content else {
            return Err(foreign_content(self.mode(), content));
        };
        let Guess::Letter(raw) = guess else {
            return Err(self.malformed("a single letter"));
        };
        let letter = self.parse_letter(raw)?;

        if !content.guessed.contains(&letter) {
            content.guessed.push(letter);
        }

        // A letter already uncovered still counts as present.
        if !content.answer.contains(&letter) {
            return Ok(Evaluation::miss());
        }
        content.uncover(letter);

        if content.is_solved() {
            Ok(Evaluation::solved())
        } else {
            Ok(Evaluation::progress())
        }
    }

    fn reveal_answer(&self, content: &mut RoundContent) {
        if let RoundContent::LetterHint(content) = content {
            content.answer_revealed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hint(name: &str) -> RoundContent {
        RoundContent::LetterHint(LetterHintContent::new(Country::new("xx", name)))
    }

    fn inner(content: &RoundContent) -> &LetterHintContent {
        match content {
            RoundContent::LetterHint(inner) => inner,
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[test]
    fn test_initial_mask_keeps_spaces_and_punctuation() {
        assert_eq!(inner(&hint("Chad")).masked(), "____");
        assert_eq!(inner(&hint("South Africa")).masked(), "_____ ______");
        assert_eq!(inner(&hint("Guinea-Bissau")).masked(), "______-______");
        assert_eq!(inner(&hint("Chad")).answer_text(), "chad");
    }

    #[test]
    fn test_present_letter_reveals_without_cost() {
        let mut content = hint("Chad");

        let eval = LetterHintStrategy.evaluate(&mut content, &Guess::letter("a")).unwrap();
        assert_eq!(eval, Evaluation::progress());
        assert_eq!(inner(&content).masked(), "__a_");
    }

    #[test]
    fn test_absent_letter_is_a_miss() {
        let mut content = hint("Chad");

        let eval = LetterHintStrategy.evaluate(&mut content, &Guess::letter("z")).unwrap();
        assert_eq!(eval, Evaluation::miss());
        assert_eq!(inner(&content).masked(), "____");
        assert_eq!(inner(&content).guessed, vec!['z']);
    }

    #[test]
    fn test_reveals_every_occurrence_case_insensitively() {
        let mut content = hint("Panama");

        LetterHintStrategy.evaluate(&mut content, &Guess::letter("A")).unwrap();
        assert_eq!(inner(&content).masked(), "_a_a_a");
    }

    #[test]
    fn test_solving_resolves() {
        let mut content = hint("Chad");

        for letter in ["c", "h", "a"] {
            let eval = LetterHintStrategy.evaluate(&mut content, &Guess::letter(letter)).unwrap();
            assert_eq!(eval, Evaluation::progress());
        }
        let eval = LetterHintStrategy.evaluate(&mut content, &Guess::letter("d")).unwrap();
        assert_eq!(eval, Evaluation::solved());
        assert!(inner(&content).is_solved());
    }

    #[test]
    fn test_repeated_letter_still_present() {
        let mut content = hint("Chad");

        LetterHintStrategy.evaluate(&mut content, &Guess::letter("a")).unwrap();
        let eval = LetterHintStrategy.evaluate(&mut content, &Guess::letter("a")).unwrap();
        assert_eq!(eval, Evaluation::progress());
        assert_eq!(inner(&content).guessed, vec!['a']);
    }

    #[test]
    fn test_malformed_letters() {
        let mut content = hint("Chad");

        for raw in ["", "  ", "ab", "7", "-"] {
            let err = LetterHintStrategy.evaluate(&mut content, &Guess::letter(raw)).unwrap_err();
            assert!(matches!(err, QuizError::MalformedGuess { .. }), "input {:?}", raw);
        }
        let err = LetterHintStrategy.evaluate(&mut content, &Guess::text("chad")).unwrap_err();
        assert!(matches!(err, QuizError::MalformedGuess { .. }));

        assert_eq!(inner(&content).masked(), "____");
        assert!(inner(&content).guessed.is_empty());
    }

    #[test]
    fn test_reveal_keeps_mask() {
        let mut content = hint("Chad");
        LetterHintStrategy.reveal_answer(&mut content);

        assert!(inner(&content).answer_revealed);
        assert_eq!(inner(&content).masked(), "____");
    }
}

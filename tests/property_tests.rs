//! Engine invariants under random operation sequences.

mod common;

use proptest::prelude::*;

use flag_quiz::core::RoundConfig;
use flag_quiz::countdown::ManualCountdown;
use flag_quiz::modes::{GameMode, Guess};
use flag_quiz::round::{RoundContent, RoundEngine, RoundStatus};

#[derive(Clone, Debug)]
enum Op {
    Right,
    Wrong,
    Second,
    Next,
}

fn any_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => Just(Op::Right),
        4 => Just(Op::Wrong),
        4 => Just(Op::Second),
        1 => Just(Op::Next),
    ]
}

fn any_mode() -> impl Strategy<Value = GameMode> {
    prop_oneof![
        Just(GameMode::PickFlag),
        Just(GameMode::TypeCountry),
        Just(GameMode::LetterHint),
        Just(GameMode::AdvancedMultiCard),
    ]
}

/// A correct payload for the current round.
fn right_guess(content: &RoundContent) -> Guess {
    match content {
        RoundContent::PickFlag(c) => Guess::choice(c.target.code.clone()),
        RoundContent::TypeCountry(c) => Guess::text(c.target.name.clone()),
        RoundContent::LetterHint(c) => {
            let hidden = c
                .answer
                .iter()
                .zip(&c.mask)
                .find(|(actual, shown)| actual != shown)
                .map(|(actual, _)| actual.to_string())
                .unwrap_or_default();
            Guess::letter(hidden)
        }
        RoundContent::AdvancedMultiCard(c) => {
            Guess::cards(c.cards.iter().map(|card| card.target.name.clone()))
        }
    }
}

/// An incorrect (but well-formed) payload for the current round.
fn wrong_guess(content: &RoundContent) -> Guess {
    match content {
        RoundContent::PickFlag(c) => {
            let code = c
                .choices
                .iter()
                .find(|code| **code != c.target.code)
                .cloned()
                .unwrap_or_default();
            Guess::choice(code)
        }
        RoundContent::TypeCountry(_) => Guess::text("Atlantis"),
        // No fixture country name contains a q.
        RoundContent::LetterHint(_) => Guess::letter("q"),
        RoundContent::AdvancedMultiCard(c) => Guess::cards(c.cards.iter().map(|_| "Atlantis")),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_invariants(
        mode in any_mode(),
        seed in any::<u64>(),
        attempts in 1u32..5,
        timed in prop::option::of(1u32..6),
        ops in prop::collection::vec(any_op(), 1..60),
    ) {
        common::logging::init();
        let clock = ManualCountdown::new();
        let config = RoundConfig { attempt_max: attempts, timed_seconds: timed };
        let mut engine = RoundEngine::builder(mode.strategy(), common::fixture_catalog())
            .config(config)
            .countdown(clock.clone())
            .seed(seed)
            .build()
            .unwrap();
        engine.process_ticks();

        for op in ops {
            let before = engine.snapshot();

            match op {
                Op::Right => { let _ = engine.submit_guess(&right_guess(&before.content)); }
                Op::Wrong => { let _ = engine.submit_guess(&wrong_guess(&before.content)); }
                Op::Second => {
                    clock.advance();
                    engine.process_ticks();
                }
                Op::Next => {
                    let next = engine.request_next().unwrap();
                    prop_assert_eq!(next.status, RoundStatus::Active);
                    prop_assert_eq!(next.attempts_left, attempts);
                    prop_assert_eq!(next.remaining_seconds(), timed);
                    prop_assert!(next.id > before.id);
                    continue;
                }
            }

            let after = engine.round();
            prop_assert_eq!(after.id, before.id);
            prop_assert!(after.attempts_left <= before.attempts_left);

            // A terminal round is frozen.
            if before.is_terminal() {
                prop_assert_eq!(after, &before);
            }

            // Losing or expiring always shows the answer; winning never does.
            match after.status {
                RoundStatus::Active | RoundStatus::Correct => {
                    prop_assert!(!after.content.answer_revealed());
                }
                RoundStatus::Incorrect => {
                    prop_assert_eq!(after.attempts_left, 0);
                    prop_assert!(after.content.answer_revealed());
                }
                RoundStatus::Expired => {
                    prop_assert_eq!(after.remaining_seconds(), Some(0));
                    prop_assert!(after.content.answer_revealed());
                }
            }

            if let (Some(old), Some(new)) = (before.remaining_seconds(), after.remaining_seconds()) {
                prop_assert!(new <= old);
            }
        }

        // At most the current round's countdown is still live.
        prop_assert!(clock.active_timers() <= 1);
    }
}

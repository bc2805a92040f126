//! Pure transition rules for a guess.
//!
//! `step` maps the current attempt budget and a strategy's verdict to
//! what happens next. The engine applies the result; this module has no
//! side effects.

use crate::modes::Evaluation;

/// Outcome of one evaluated guess on an active round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Round won.
    Solved,
    /// Right but unfinished; budget unchanged.
    Progress,
    /// Wrong; budget reduced, round continues.
    Miss { attempts_left: u32 },
    /// Wrong and the budget is spent; round lost.
    Exhausted,
}

/// Decide the next step for an active round with `attempts_left` (>= 1).
#[must_use]
pub fn step(attempts_left: u32, evaluation: Evaluation) -> Step {
    match (evaluation.correct, evaluation.fully_resolved) {
        (true, true) => Step::Solved,
        (true, false) => Step::Progress,
        (false, _) => match attempts_left.saturating_sub(1) {
            0 => Step::Exhausted,
            attempts_left => Step::Miss { attempts_left },
        },
    }
}

impl Step {
    /// Attempts remaining after this step, starting from `before`.
    #[must_use]
    pub fn attempts_after(self, before: u32) -> u32 {
        match self {
            Step::Solved | Step::Progress => before,
            Step::Miss { attempts_left } => attempts_left,
            Step::Exhausted => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_rule_table() {
        assert_eq!(step(3, Evaluation::solved()), Step::Solved);
        assert_eq!(step(3, Evaluation::progress()), Step::Progress);
        assert_eq!(step(3, Evaluation::miss()), Step::Miss { attempts_left: 2 });
        assert_eq!(step(1, Evaluation::miss()), Step::Exhausted);
    }

    #[test]
    fn test_wrong_single_shot_still_costs_one_attempt() {
        assert_eq!(step(2, Evaluation::single_shot(false)), Step::Miss { attempts_left: 1 });
        assert_eq!(step(1, Evaluation::single_shot(false)), Step::Exhausted);
    }

    #[test]
    fn test_zero_budget_does_not_underflow() {
        assert_eq!(step(0, Evaluation::miss()), Step::Exhausted);
        assert_eq!(Step::Exhausted.attempts_after(0), 0);
    }

    fn any_evaluation() -> impl Strategy<Value = Evaluation> {
        (any::<bool>(), any::<bool>()).prop_map(|(correct, fully_resolved)| Evaluation {
            correct,
            fully_resolved,
        })
    }

    proptest! {
        #[test]
        fn prop_budget_never_increases(before in 1u32..100, evaluation in any_evaluation()) {
            let after = step(before, evaluation).attempts_after(before);
            prop_assert!(after <= before);
            prop_assert!(before - after <= 1);
        }

        #[test]
        fn prop_only_wrong_guesses_cost(before in 1u32..100, evaluation in any_evaluation()) {
            let after = step(before, evaluation).attempts_after(before);
            prop_assert_eq!(after < before, !evaluation.correct);
        }
    }
}

//! The round engine: owns the current round and applies the three
//! operations the presentation layer may trigger.
//!
//! ## Operations
//!
//! - `submit_guess`: evaluate a guess through the mode's strategy
//! - `tick`: apply one countdown tick
//! - `request_next`: replace the round with a fresh one
//!
//! All operations are synchronous and must be serialized by the caller.
//! The countdown is the only asynchronous producer; its ticks reach the
//! engine through a [`TickSink`] and are applied in arrival order.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use flag_quiz::catalog::CountryCatalog;
//! use flag_quiz::modes::{GameMode, Guess};
//! use flag_quiz::round::{RoundEngine, RoundStatus};
//!
//! let catalog = Arc::new(CountryCatalog::from_pairs([("fr", "France")]).unwrap());
//! let mut engine = RoundEngine::builder(GameMode::TypeCountry.strategy(), catalog)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let outcome = engine.submit_guess(&Guess::text(" FRANCE ")).unwrap();
//! assert_eq!(outcome.status, RoundStatus::Correct);
//!
//! let next = engine.request_next().unwrap();
//! assert_eq!(next.status, RoundStatus::Active);
//! ```

use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use super::state::{RoundId, RoundState, RoundStatus};
use super::transition::{step, Step};
use crate::catalog::CountryCatalog;
use crate::core::{QuizError, QuizRng, Result, RoundConfig};
use crate::countdown::{CancelHandle, Countdown, Tick, TickQueue, TickSink, TokioCountdown};
use crate::modes::{Evaluation, GameMode, Guess, ModeStrategy};

/// Result of a successful `submit_guess`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuessOutcome {
    pub evaluation: Evaluation,
    pub status: RoundStatus,
    pub attempts_left: u32,
    /// The payload had the wrong shape and was counted as a miss.
    pub malformed: bool,
}

/// Result of applying a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown advanced; round still active.
    Running { remaining: u32 },
    /// This tick expired the round.
    Expired,
    /// Round already terminal (or untimed); tick dropped.
    Ignored,
    /// Tick belongs to a round that has been replaced; dropped.
    Stale,
}

/// Builder for [`RoundEngine`].
pub struct RoundEngineBuilder {
    strategy: Arc<dyn ModeStrategy>,
    catalog: Arc<CountryCatalog>,
    config: RoundConfig,
    rng: Option<QuizRng>,
    countdown: Option<Arc<dyn Countdown>>,
    sink: Option<TickSink>,
}

impl RoundEngineBuilder {
    /// Round configuration. Defaults to 3 attempts, untimed.
    #[must_use]
    pub fn config(mut self, config: RoundConfig) -> Self {
        self.config = config;
        self
    }

    /// Apply the countdown-mode toggle to the configuration.
    #[must_use]
    pub fn countdown_mode(mut self, enabled: bool) -> Self {
        self.config = self.config.with_countdown_mode(enabled);
        self
    }

    /// Seed the RNG for reproducible rounds.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = Some(QuizRng::new(seed));
        self
    }

    #[must_use]
    pub fn rng(mut self, rng: QuizRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Clock driving timed rounds.
    ///
    /// Defaults to a one-second [`TokioCountdown`] on the current runtime.
    /// Outside a runtime there is no default clock and timed rounds are
    /// refused with `NoRuntime`.
    #[must_use]
    pub fn countdown(mut self, countdown: impl Countdown + 'static) -> Self {
        self.countdown = Some(Arc::new(countdown));
        self
    }

    #[must_use]
    pub fn shared_countdown(mut self, countdown: Arc<dyn Countdown>) -> Self {
        self.countdown = Some(countdown);
        self
    }

    /// Where countdown ticks are sent.
    ///
    /// Defaults to the engine's own queue, drained by
    /// [`RoundEngine::process_ticks`].
    #[must_use]
    pub fn tick_sink(mut self, sink: TickSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub(crate) fn has_countdown(&self) -> bool {
        self.countdown.is_some()
    }

    /// Validate the setup and create the first round.
    ///
    /// Fails with `ContentExhaustion` if the catalog is too small for the
    /// mode, `InvalidConfig` for a bad config, or `NoRuntime` for a timed
    /// config with no clock to drive it.
    pub fn build(self) -> Result<RoundEngine> {
        self.config.validate()?;
        self.strategy.check_capacity(&self.catalog)?;

        let countdown = match self.countdown {
            Some(countdown) => Some(countdown),
            None => TokioCountdown::current()
                .ok()
                .map(|clock| Arc::new(clock) as Arc<dyn Countdown>),
        };
        if self.config.is_timed() && countdown.is_none() {
            return Err(QuizError::NoRuntime);
        }

        let mut rng = self.rng.unwrap_or_else(QuizRng::from_entropy);
        let pending = TickQueue::new();
        let sink = self.sink.unwrap_or_else(|| pending.sink());

        let first = RoundId::new(1);
        let content = self.strategy.initialize(&self.catalog, &mut rng)?;
        let round = RoundState::new(first, &self.config, content);

        debug!(
            mode = %self.strategy.mode(),
            seed = rng.seed(),
            countries = self.catalog.len(),
            "round engine ready"
        );

        let mut engine = RoundEngine {
            strategy: self.strategy,
            catalog: self.catalog,
            config: self.config,
            rng,
            countdown,
            sink,
            pending,
            round,
            timer: None,
            last_round: first,
        };
        engine.round_started();
        Ok(engine)
    }
}

/// State machine for one stream of rounds in a single mode.
pub struct RoundEngine {
    strategy: Arc<dyn ModeStrategy>,
    catalog: Arc<CountryCatalog>,
    config: RoundConfig,
    rng: QuizRng,
    /// `None` only for engines built outside a runtime with no clock given.
    countdown: Option<Arc<dyn Countdown>>,
    sink: TickSink,
    pending: TickQueue,
    round: RoundState,
    /// Handle for the current round's countdown, if one is running.
    timer: Option<CancelHandle>,
    last_round: RoundId,
}

impl RoundEngine {
    #[must_use]
    pub fn builder(strategy: Arc<dyn ModeStrategy>, catalog: Arc<CountryCatalog>) -> RoundEngineBuilder {
        RoundEngineBuilder {
            strategy,
            catalog,
            config: RoundConfig::default(),
            rng: None,
            countdown: None,
            sink: None,
        }
    }

    /// The current round.
    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// An owned copy of the current round.
    #[must_use]
    pub fn snapshot(&self) -> RoundState {
        self.round.clone()
    }

    /// Config the next round will be created with.
    #[must_use]
    pub fn config(&self) -> RoundConfig {
        self.config
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.strategy.mode()
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<CountryCatalog> {
        &self.catalog
    }

    /// Seed of the engine's RNG, for replaying a session.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Turn countdown mode on or off for rounds created from now on.
    ///
    /// Fails with `NoRuntime`, leaving the config as it was, when turning
    /// it on for an engine that has no clock.
    pub fn set_countdown_mode(&mut self, enabled: bool) -> Result<()> {
        if enabled && self.countdown.is_none() {
            return Err(QuizError::NoRuntime);
        }
        self.config = self.config.with_countdown_mode(enabled);
        debug!(enabled, "countdown mode changed");
        Ok(())
    }

    /// Discard the current round and start a new one with the same
    /// strategy and config.
    pub fn create_round(&mut self) -> Result<&RoundState> {
        self.stop_countdown();

        let content = self.strategy.initialize(&self.catalog, &mut self.rng)?;
        let id = RoundId::new(self.last_round.raw() + 1);
        self.round = RoundState::new(id, &self.config, content);
        self.last_round = id;

        self.round_started();
        Ok(&self.round)
    }

    /// Leave the current round, terminal or not, for a fresh one.
    pub fn request_next(&mut self) -> Result<&RoundState> {
        debug!(round = %self.round.id, status = %self.round.status, "next round requested");
        self.create_round()
    }

    /// Evaluate a guess against the current round.
    ///
    /// Returns `InvalidTransition` if the round is already terminal; the
    /// round is left untouched and the caller may ignore the error. A
    /// malformed payload is counted as a miss.
    pub fn submit_guess(&mut self, guess: &Guess) -> Result<GuessOutcome> {
        if self.round.is_terminal() {
            debug!(round = %self.round.id, status = %self.round.status, "guess on finished round ignored");
            return Err(QuizError::InvalidTransition {
                round: self.round.id,
                status: self.round.status,
            });
        }

        let mut next = self.round.clone();
        let (evaluation, malformed) = match self.strategy.evaluate(&mut next.content, guess) {
            Ok(evaluation) => (evaluation, false),
            Err(err @ QuizError::MalformedGuess { .. }) => {
                warn!(round = %next.id, error = %err, "malformed guess counted as a miss");
                (Evaluation::miss(), true)
            }
            Err(err) => return Err(err),
        };

        let step = step(next.attempts_left, evaluation);
        next.attempts_left = step.attempts_after(next.attempts_left);
        match step {
            Step::Solved => next.status = RoundStatus::Correct,
            Step::Exhausted => {
                next.status = RoundStatus::Incorrect;
                self.strategy.reveal_answer(&mut next.content);
            }
            Step::Progress | Step::Miss { .. } => {}
        }

        debug!(
            round = %next.id,
            correct = evaluation.correct,
            fully_resolved = evaluation.fully_resolved,
            attempts_left = next.attempts_left,
            "guess evaluated"
        );

        self.round = next;
        if self.round.is_terminal() {
            self.stop_countdown();
            info!(round = %self.round.id, mode = %self.mode(), status = %self.round.status, "round finished");
        }

        Ok(GuessOutcome {
            evaluation,
            status: self.round.status,
            attempts_left: self.round.attempts_left,
            malformed,
        })
    }

    /// Apply one countdown tick.
    ///
    /// A tick reaching zero on an active round expires it and reveals the
    /// answer. Ticks for terminal or replaced rounds are dropped.
    pub fn tick(&mut self, tick: Tick) -> TickOutcome {
        if tick.round != self.round.id {
            trace!(tick_round = %tick.round, round = %self.round.id, "stale tick dropped");
            return TickOutcome::Stale;
        }
        if self.round.is_terminal() {
            trace!(round = %self.round.id, "tick on finished round dropped");
            return TickOutcome::Ignored;
        }
        let Some(countdown) = self.round.countdown.as_mut() else {
            return TickOutcome::Ignored;
        };

        if !countdown.apply_tick(tick.remaining) {
            return TickOutcome::Running {
                remaining: countdown.remaining,
            };
        }

        self.round.status = RoundStatus::Expired;
        self.strategy.reveal_answer(&mut self.round.content);
        self.stop_countdown();
        info!(round = %self.round.id, mode = %self.mode(), "round expired");
        TickOutcome::Expired
    }

    /// Apply every tick waiting in the engine's own queue, oldest first.
    ///
    /// Only relevant when no custom tick sink was configured.
    pub fn process_ticks(&mut self) -> Vec<TickOutcome> {
        let mut outcomes = Vec::new();
        while let Some(tick) = self.pending.pop() {
            outcomes.push(self.tick(tick));
        }
        outcomes
    }

    /// Start the countdown for a freshly created round, if it is timed.
    fn round_started(&mut self) {
        debug!(
            round = %self.round.id,
            mode = %self.mode(),
            attempts = self.round.attempt_max,
            timed_seconds = ?self.round.remaining_seconds(),
            "round created"
        );

        let (Some(seconds), Some(clock)) = (self.round.remaining_seconds(), self.countdown.as_ref()) else {
            return;
        };
        let round = self.round.id;
        let sink = Arc::clone(&self.sink);
        let handle = clock.start(seconds, Box::new(move |remaining| sink(Tick { round, remaining })));
        self.timer = Some(handle);
    }

    /// Cancel the running countdown, if any.
    fn stop_countdown(&mut self) {
        self.cancel_timer();
        if let Some(countdown) = self.round.countdown.as_mut() {
            countdown.running = false;
        }
    }

    fn cancel_timer(&mut self) {
        let Some(handle) = self.timer.take() else {
            return;
        };
        match &self.countdown {
            Some(clock) => clock.cancel(&handle),
            None => {
                handle.cancel();
            }
        }
    }
}

impl Drop for RoundEngine {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

impl std::fmt::Debug for RoundEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundEngine")
            .field("mode", &self.mode())
            .field("config", &self.config)
            .field("round", &self.round)
            .finish_non_exhaustive()
    }
}

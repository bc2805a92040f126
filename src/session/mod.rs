//! Async driver for a round engine.
//!
//! A session moves the engine onto a tokio task. Guesses, next-round
//! requests and countdown ticks all travel through one command queue, so
//! every operation is applied in arrival order and nothing touches the
//! engine concurrently.
//!
//! The presentation layer talks to the task through a [`SessionHandle`]:
//! commands go in over an mpsc channel, round snapshots come out over a
//! `watch` channel.
//!
//! ```no_run
//! use std::sync::Arc;
//! use flag_quiz::catalog::CountryCatalog;
//! use flag_quiz::modes::{GameMode, Guess};
//! use flag_quiz::round::{RoundEngine, RoundStatus};
//! use flag_quiz::session::spawn_session;
//!
//! # async fn run() -> flag_quiz::core::Result<()> {
//! let catalog = Arc::new(CountryCatalog::from_json_str(r#"{"FR": "France"}"#)?);
//! let builder = RoundEngine::builder(GameMode::TypeCountry.strategy(), catalog).countdown_mode(true);
//!
//! let (mut session, _task) = spawn_session(builder)?;
//! session.submit_guess(Guess::text("France")).await?;
//!
//! let round = session.wait_for(|round| round.is_terminal()).await?;
//! assert_eq!(round.status, RoundStatus::Correct);
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::core::{QuizError, Result};
use crate::countdown::{Tick, TickSink, TokioCountdown};
use crate::modes::Guess;
use crate::round::{GuessOutcome, RoundEngine, RoundEngineBuilder, RoundState, TickOutcome};

/// Commands processed by the session task
enum Command {
    Submit {
        guess: Guess,
        reply: oneshot::Sender<Result<GuessOutcome>>,
    },
    Next {
        reply: oneshot::Sender<Result<RoundState>>,
    },
    SetCountdownMode(bool),
    Tick(Tick),
}

/// Cloneable handle to a running session.
///
/// The session task stops once every handle is dropped; the engine's
/// countdown is cancelled with it.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<RoundState>,
}

impl SessionHandle {
    /// Submit a guess for the current round.
    ///
    /// The guess is queued when this is called, not when the returned
    /// future is first polled. Errors from the engine (such as
    /// `InvalidTransition` on a finished round) are passed through
    /// unchanged.
    pub fn submit_guess(&self, guess: Guess) -> impl Future<Output = Result<GuessOutcome>> {
        let (reply, response) = oneshot::channel();
        let queued = self.send(Command::Submit { guess, reply });
        async move {
            queued?;
            response.await.map_err(|_| QuizError::SessionClosed)?
        }
    }

    /// Replace the current round with a fresh one. Queued on call.
    pub fn request_next(&self) -> impl Future<Output = Result<RoundState>> {
        let (reply, response) = oneshot::channel();
        let queued = self.send(Command::Next { reply });
        async move {
            queued?;
            response.await.map_err(|_| QuizError::SessionClosed)?
        }
    }

    /// Toggle countdown mode for rounds created after this call.
    pub fn set_countdown_mode(&self, enabled: bool) -> Result<()> {
        self.send(Command::SetCountdownMode(enabled))
    }

    /// Latest published round.
    #[must_use]
    pub fn snapshot(&self) -> RoundState {
        self.snapshots.borrow().clone()
    }

    /// A fresh receiver for round snapshots.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RoundState> {
        self.snapshots.clone()
    }

    /// Wait for the next published change.
    pub async fn changed(&mut self) -> Result<RoundState> {
        self.snapshots
            .changed()
            .await
            .map_err(|_| QuizError::SessionClosed)?;
        Ok(self.snapshots.borrow_and_update().clone())
    }

    /// Wait until the published round satisfies `predicate`.
    ///
    /// Checks the current round first, so it returns at once if the
    /// condition already holds.
    pub async fn wait_for(&mut self, predicate: impl FnMut(&RoundState) -> bool) -> Result<RoundState> {
        let round = self
            .snapshots
            .wait_for(predicate)
            .await
            .map_err(|_| QuizError::SessionClosed)?;
        Ok(round.clone())
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| QuizError::SessionClosed)
    }
}

/// Build the engine and run it on the current tokio runtime.
///
/// Without an explicit countdown the engine gets a [`TokioCountdown`]
/// ticking once per second. Fails with `NoRuntime` outside a runtime,
/// or with whatever `RoundEngineBuilder::build` reports.
pub fn spawn_session(builder: RoundEngineBuilder) -> Result<(SessionHandle, JoinHandle<()>)> {
    let runtime = Handle::try_current().map_err(|_| QuizError::NoRuntime)?;
    let (commands, queue) = mpsc::unbounded_channel();

    // Weak so a running countdown does not keep the session alive.
    let ticks = commands.downgrade();
    let sink: TickSink = Arc::new(move |tick| {
        if let Some(commands) = ticks.upgrade() {
            let _ = commands.send(Command::Tick(tick));
        }
    });

    let builder = if builder.has_countdown() {
        builder
    } else {
        builder.countdown(TokioCountdown::new(runtime.clone(), std::time::Duration::from_secs(1)))
    };
    let engine = builder.tick_sink(sink).build()?;

    let (publisher, snapshots) = watch::channel(engine.snapshot());
    debug!(mode = %engine.mode(), seed = engine.seed(), "session started");

    let task = runtime.spawn(run(engine, queue, publisher));
    Ok((SessionHandle { commands, snapshots }, task))
}

async fn run(
    mut engine: RoundEngine,
    mut queue: mpsc::UnboundedReceiver<Command>,
    publisher: watch::Sender<RoundState>,
) {
    while let Some(command) = queue.recv().await {
        match command {
            Command::Submit { guess, reply } => {
                let _ = reply.send(engine.submit_guess(&guess));
            }
            Command::Next { reply } => {
                let _ = reply.send(engine.request_next().cloned());
            }
            Command::SetCountdownMode(enabled) => {
                if let Err(err) = engine.set_countdown_mode(enabled) {
                    warn!(error = %err, "countdown mode unchanged");
                }
            }
            Command::Tick(tick) => {
                if let outcome @ (TickOutcome::Stale | TickOutcome::Ignored) = engine.tick(tick) {
                    trace!(?outcome, "tick dropped");
                    continue;
                }
            }
        }

        publisher.send_if_modified(|published| {
            if published == engine.round() {
                return false;
            }
            *published = engine.snapshot();
            true
        });
    }
    debug!(mode = %engine.mode(), "session closed");
}

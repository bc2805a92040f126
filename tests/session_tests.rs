//! Session integration tests.
//!
//! A session runs the engine on a tokio task; these tests check that
//! guesses, ticks, and next-round requests are applied in arrival order
//! and published to every handle.

mod common;

use std::time::Duration;

use flag_quiz::core::{QuizError, RoundConfig};
use flag_quiz::countdown::ManualCountdown;
use flag_quiz::modes::{GameMode, Guess};
use flag_quiz::round::{RoundContent, RoundEngine, RoundEngineBuilder, RoundStatus};
use flag_quiz::session::spawn_session;

use common::{catalog_of, fixture_catalog};

fn builder(mode: GameMode, config: RoundConfig) -> RoundEngineBuilder {
    common::logging::init();
    RoundEngine::builder(mode.strategy(), fixture_catalog())
        .config(config)
        .seed(99)
}

// =============================================================================
// Countdown Wiring
// =============================================================================

/// Test that a caller-supplied clock drives the session's rounds.
#[tokio::test]
async fn test_manual_clock_expires_session_round() {
    let clock = ManualCountdown::new();
    let (mut session, _task) =
        spawn_session(builder(GameMode::TypeCountry, RoundConfig::new(3).timed(2)).countdown(clock.clone()))
            .unwrap();

    clock.advance_by(2);
    let round = session.wait_for(|round| round.is_terminal()).await.unwrap();

    assert_eq!(round.status, RoundStatus::Expired);
    assert_eq!(clock.active_timers(), 0);
}

/// Test that the default clock runs in real seconds.
#[tokio::test(start_paused = true)]
async fn test_default_clock_counts_seconds() {
    let (mut session, _task) = spawn_session(builder(GameMode::LetterHint, RoundConfig::new(3).timed(10))).unwrap();
    let started = tokio::time::Instant::now();

    let round = session.wait_for(|round| round.is_terminal()).await.unwrap();

    assert_eq!(round.status, RoundStatus::Expired);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(10) && elapsed < Duration::from_secs(11));
}

/// Test that remaining seconds are published as they tick down.
#[tokio::test(start_paused = true)]
async fn test_remaining_seconds_published() {
    let (mut session, _task) = spawn_session(builder(GameMode::TypeCountry, RoundConfig::new(3).timed(5))).unwrap();

    let round = session.wait_for(|round| round.remaining_seconds() == Some(3)).await.unwrap();
    assert_eq!(round.status, RoundStatus::Active);

    let round = session.changed().await.unwrap();
    assert_eq!(round.remaining_seconds(), Some(2));
}

// =============================================================================
// Ordering
// =============================================================================

/// Test that a guess queued ahead of the final tick decides the round.
#[tokio::test]
async fn test_exhaustion_queued_before_expiry() {
    let clock = ManualCountdown::new();
    let catalog = catalog_of(&[("fr", "France")]);
    let builder = RoundEngine::builder(GameMode::TypeCountry.strategy(), catalog)
        .config(RoundConfig::new(1).timed(1))
        .countdown(clock.clone())
        .seed(1);
    let (mut session, _task) = spawn_session(builder).unwrap();

    let guess = session.submit_guess(Guess::text("Chad"));
    clock.advance();
    let outcome = guess.await.unwrap();

    assert_eq!(outcome.status, RoundStatus::Incorrect);
    let round = session.wait_for(|round| round.is_terminal()).await.unwrap();
    assert_eq!(round.status, RoundStatus::Incorrect);
}

/// Test that every handle sees the same rounds.
#[tokio::test(start_paused = true)]
async fn test_cloned_handles_share_rounds() {
    let (session, _task) = spawn_session(builder(GameMode::AdvancedMultiCard, RoundConfig::new(3))).unwrap();
    let mut watcher = session.clone();

    let names = match session.snapshot().content {
        RoundContent::AdvancedMultiCard(content) => {
            content.cards.iter().map(|card| card.target.name.clone()).collect::<Vec<_>>()
        }
        other => panic!("unexpected content {:?}", other),
    };
    let outcome = session.submit_guess(Guess::cards(names)).await.unwrap();
    assert_eq!(outcome.status, RoundStatus::Correct);

    let round = watcher.wait_for(|round| round.is_terminal()).await.unwrap();
    assert_eq!(round.status, RoundStatus::Correct);

    let next = session.request_next().await.unwrap();
    let seen = watcher.wait_for(|round| round.id == next.id).await.unwrap();
    assert_eq!(seen.status, RoundStatus::Active);
    assert_eq!(seen.attempts_left, 3);
}

// =============================================================================
// Shutdown
// =============================================================================

/// Test that a finished task reports SessionClosed to late callers.
#[tokio::test(start_paused = true)]
async fn test_closed_session_reports_error() {
    let (session, task) = spawn_session(builder(GameMode::PickFlag, RoundConfig::new(3))).unwrap();

    task.abort();
    let _ = task.await;

    let err = session.request_next().await.unwrap_err();
    assert!(matches!(err, QuizError::SessionClosed));
    assert!(matches!(session.set_countdown_mode(true), Err(QuizError::SessionClosed)));
}

/// Test that a session refuses a catalog too small for its mode.
#[tokio::test]
async fn test_spawn_rejects_small_catalog() {
    let builder = RoundEngine::builder(GameMode::AdvancedMultiCard.strategy(), catalog_of(&[("fr", "France")]));

    let err = spawn_session(builder).unwrap_err();
    assert!(matches!(err, QuizError::ContentExhaustion { .. }));
}

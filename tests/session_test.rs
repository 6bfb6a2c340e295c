//! Tests for the game session state machine.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use slide_puzzle::{
    GameSession, LevelConfig, MemoryStorage, MoveOutcome, ProgressStore, SessionPhase, Ticker,
    level_config,
};

fn store() -> ProgressStore<MemoryStorage> {
    ProgressStore::new(MemoryStorage::new())
}

/// Small timed config: one shuffle move, so the inverse move at the
/// blank's home corner (index 8) solves the board deterministically.
fn timed_config() -> LevelConfig {
    LevelConfig::new(3, 1, true, "")
}

#[test]
fn test_new_session_is_ready() {
    let mut rng = StdRng::seed_from_u64(3);
    let session = GameSession::new_with_rng(2, level_config(2), &mut rng);
    assert_eq!(session.phase(), SessionPhase::Ready);
    assert_eq!(session.move_count(), 0);
    assert_eq!(session.elapsed_seconds(), 0);
    assert!(!session.is_solved());
    assert_eq!(session.board().size(), 4);
}

#[test]
fn test_zero_shuffle_session_starts_on_solved_board() {
    let config = LevelConfig::new(3, 0, false, "");
    let session = GameSession::new(1, config);
    assert!(session.board().is_solved());
    assert_eq!(session.phase(), SessionPhase::Ready);
}

#[test]
fn test_tick_requires_timer() {
    let config = LevelConfig::new(3, 5, false, "");
    let mut session = GameSession::new(1, config);
    session.tick();
    assert_eq!(session.elapsed_seconds(), 0);
    assert_eq!(session.phase(), SessionPhase::Ready);
}

#[test]
fn test_tick_advances_time_and_phase() {
    let mut session = GameSession::new_with_rng(2, timed_config(), &mut StdRng::seed_from_u64(5));
    session.tick();
    session.tick();
    assert_eq!(session.elapsed_seconds(), 2);
    assert_eq!(session.phase(), SessionPhase::InProgress);
}

#[test]
fn test_illegal_move_is_ignored() {
    let mut session = GameSession::new_with_rng(1, level_config(1), &mut StdRng::seed_from_u64(11));
    let blank = session.board().blank();
    assert_eq!(session.request_move(blank), MoveOutcome::Ignored);
    assert_eq!(session.request_move(usize::MAX), MoveOutcome::Ignored);
    assert_eq!(session.move_count(), 0);
    assert_eq!(session.phase(), SessionPhase::Ready);
}

#[test]
fn test_single_inverse_move_solves() {
    let mut session = GameSession::new_with_rng(2, timed_config(), &mut StdRng::seed_from_u64(8));
    assert_eq!(session.request_move(8), MoveOutcome::Solved);
    assert_eq!(session.move_count(), 1);
    assert!(session.is_solved());
    assert!(session.board().is_solved());
}

#[test]
fn test_no_ticks_after_solve() {
    let mut session = GameSession::new_with_rng(2, timed_config(), &mut StdRng::seed_from_u64(8));
    assert_eq!(session.request_move(8), MoveOutcome::Solved);
    session.tick();
    assert_eq!(session.elapsed_seconds(), 0);
}

#[test]
fn test_moves_after_solve_are_ignored() {
    let mut session = GameSession::new_with_rng(2, timed_config(), &mut StdRng::seed_from_u64(8));
    assert_eq!(session.request_move(8), MoveOutcome::Solved);
    let legal = session.board().legal_moves();
    assert_eq!(session.request_move(legal[0]), MoveOutcome::Ignored);
    assert_eq!(session.move_count(), 1);
}

#[test]
fn test_reshuffle_resets_session() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut session = GameSession::new_with_rng(2, timed_config(), &mut rng);
    assert_eq!(session.request_move(8), MoveOutcome::Solved);

    session.reshuffle_with_rng(&mut rng);
    assert_eq!(session.phase(), SessionPhase::Ready);
    assert_eq!(session.move_count(), 0);
    assert_eq!(session.elapsed_seconds(), 0);
    assert!(!session.is_solved());
}

#[test]
fn test_solve_summary_records_best_and_unlock() {
    let store = store();
    let mut session = GameSession::new_with_rng(2, timed_config(), &mut StdRng::seed_from_u64(8));
    session.tick();
    assert_eq!(session.request_move(8), MoveOutcome::Solved);

    let summary = session.solve_summary(&store);
    assert!(*summary.is_best());
    assert!(summary.previous().is_none());
    assert_eq!(*summary.next_level(), Some(3));
    assert_eq!(store.unlocked_level(), 3);

    let record = store.highscore(2).expect("highscore stored");
    assert_eq!(*record.move_count(), 1);
    assert_eq!(*record.elapsed_seconds(), Some(1));
}

#[test]
fn test_worse_rerun_is_not_best() {
    let store = store();
    let mut session = GameSession::new_with_rng(2, timed_config(), &mut StdRng::seed_from_u64(8));
    assert_eq!(session.request_move(8), MoveOutcome::Solved);
    assert!(*session.solve_summary(&store).is_best());

    // Same moves but slower: the stored record stays.
    let mut session = GameSession::new_with_rng(2, timed_config(), &mut StdRng::seed_from_u64(8));
    session.tick();
    session.tick();
    assert_eq!(session.request_move(8), MoveOutcome::Solved);
    let summary = session.solve_summary(&store);
    assert!(!*summary.is_best());
    assert!(summary.previous().is_some());
}

#[test]
fn test_final_level_offers_no_next_and_keeps_unlock() {
    let store = store();
    let mut session = GameSession::new_with_rng(5, timed_config(), &mut StdRng::seed_from_u64(8));
    assert_eq!(session.request_move(8), MoveOutcome::Solved);

    let summary = session.solve_summary(&store);
    assert_eq!(*summary.next_level(), None);
    assert_eq!(store.unlocked_level(), 0);
}

#[test]
fn test_untimed_score_has_no_time() {
    let store = store();
    let config = LevelConfig::new(3, 1, false, "");
    let mut session = GameSession::new_with_rng(1, config, &mut StdRng::seed_from_u64(8));
    assert_eq!(session.request_move(8), MoveOutcome::Solved);

    let summary = session.solve_summary(&store);
    assert_eq!(*summary.score().elapsed_seconds(), None);
    assert_eq!(store.unlocked_level(), 2);
}

#[test]
fn test_ticker_counts_whole_periods() {
    let mut ticker = Ticker::stopped();
    assert!(!ticker.is_running());

    let t0 = Instant::now();
    ticker.start(t0);
    assert!(ticker.is_running());
    assert_eq!(ticker.poll(t0), 0);
    assert_eq!(ticker.poll(t0 + Duration::from_millis(2500)), 2);
    assert_eq!(ticker.poll(t0 + Duration::from_millis(2900)), 0);
    assert_eq!(ticker.poll(t0 + Duration::from_millis(3100)), 1);

    ticker.stop();
    assert!(!ticker.is_running());
    assert_eq!(ticker.poll(t0 + Duration::from_secs(60)), 0);
}

#[test]
fn test_poll_tick_applies_due_seconds() {
    let mut session = GameSession::new_with_rng(2, timed_config(), &mut StdRng::seed_from_u64(8));
    let later = Instant::now() + Duration::from_millis(3200);
    assert!(session.poll_tick(later));
    assert_eq!(session.elapsed_seconds(), 3);
}

#[test]
fn test_render_state_snapshot() {
    let session = GameSession::new_with_rng(2, timed_config(), &mut StdRng::seed_from_u64(8));
    let state = session.render_state();
    assert_eq!(state.tiles(), session.board().tiles());
    assert_eq!(state.size(), session.board().size());
    assert_eq!(state.blank(), session.board().blank());
    assert_eq!(state.legal_moves(), session.board().legal_moves().as_slice());
    assert_eq!(state.move_count(), 0);
    assert!(!state.solved());
}

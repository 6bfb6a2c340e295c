//! Slide Puzzle library - sliding-tile puzzle engine and terminal UI.
//!
//! # Architecture
//!
//! - **Puzzle**: board model, shuffle generator, session state machine
//! - **Levels**: immutable level catalog selected by id
//! - **Store**: persisted progress and highscores (key-value, fail-soft)
//! - **Tutorial**: scripted walk-through on a 2×2 board
//! - **Lobby**: multi-screen terminal UI driving the engine
//!
//! # Example
//!
//! ```
//! use slide_puzzle::{GameSession, MoveOutcome, level_config};
//!
//! let config = level_config(1);
//! let mut session = GameSession::new(1, config);
//! let moves = session.board().legal_moves();
//! let outcome = session.request_move(moves[0]);
//! assert!(outcome == MoveOutcome::Moved || outcome == MoveOutcome::Solved);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod levels;
mod lobby;
mod puzzle;
mod store;
mod tutorial;

// Crate-level exports - puzzle engine
pub use puzzle::{
    Board, GameSession, MIN_SIZE, MoveError, MoveOutcome, RenderState, SessionPhase, SolveSummary,
    Ticker, shuffle,
};

// Crate-level exports - level catalog
pub use levels::{LEVEL_COUNT, LevelConfig, level_config};

// Crate-level exports - progress store
pub use store::{FileStorage, HighscoreRecord, KvStorage, MemoryStorage, ProgressStore, StoreError};

// Crate-level exports - tutorial
pub use tutorial::{StepAction, Tutorial, TutorialStep};

// Crate-level exports - lobby UI
pub use lobby::{
    GameScreen, LevelSelectScreen, LobbyController, MainMenuScreen, Progress, Screen,
    ScreenTransition, TutorialScreen,
};

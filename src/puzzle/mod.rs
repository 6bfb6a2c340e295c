//! Puzzle engine: board model, shuffle generator, and session state machine.

mod board;
mod session;
mod shuffle;

pub use board::{Board, MIN_SIZE, MoveError};
pub use session::{GameSession, MoveOutcome, RenderState, SessionPhase, SolveSummary, Ticker};
pub use shuffle::shuffle;

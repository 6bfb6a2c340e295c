//! Level catalog.
//!
//! Levels are immutable configurations selected by an integer id. Unknown
//! ids fall back to a small default board so a bad level argument can never
//! crash the game.

use tracing::instrument;

/// Number of selectable levels beyond the tutorial.
pub const LEVEL_COUNT: u8 = 5;

/// Immutable configuration for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelConfig {
    size: usize,
    shuffle_moves: u32,
    timer_enabled: bool,
    info_text: &'static str,
}

impl LevelConfig {
    /// Creates a level configuration.
    pub const fn new(
        size: usize,
        shuffle_moves: u32,
        timer_enabled: bool,
        info_text: &'static str,
    ) -> Self {
        Self {
            size,
            shuffle_moves,
            timer_enabled,
            info_text,
        }
    }

    /// Board edge length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of random legal moves used to shuffle the board.
    pub fn shuffle_moves(&self) -> u32 {
        self.shuffle_moves
    }

    /// Whether this level tracks elapsed time.
    pub fn timer_enabled(&self) -> bool {
        self.timer_enabled
    }

    /// Hint text shown alongside the board.
    pub fn info_text(&self) -> &'static str {
        self.info_text
    }
}

/// Returns the configuration for a level id.
///
/// Ids 1..=[`LEVEL_COUNT`] are defined; any other id falls back to the
/// default (3×3, 10 shuffle moves, no timer).
#[instrument]
pub fn level_config(level: u8) -> LevelConfig {
    match level {
        1 => LevelConfig::new(
            3,
            10,
            false,
            "Tip: slide the tiles next to the blank square to move them!",
        ),
        2 => LevelConfig::new(4, 35, true, ""),
        3 => LevelConfig::new(5, 60, true, ""),
        4 => LevelConfig::new(6, 90, true, ""),
        5 => LevelConfig::new(7, 150, true, ""),
        _ => LevelConfig::new(3, 10, false, ""),
    }
}

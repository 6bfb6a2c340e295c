//! Interactive tutorial over a fixed 2×2 board.
//!
//! A fixed linear script of guided steps. Steps that await a move accept
//! only the scripted tile indices, and only when the board model's own
//! adjacency rule allows the slide; everything else is ignored. The final
//! step unlocks level 1.

use tracing::{debug, info, instrument};

use crate::puzzle::Board;
use crate::store::{KvStorage, ProgressStore};

/// What a tutorial step asks of the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    /// Show the board; the "next" control advances.
    Explain,
    /// Show the board with highlights; the "next" control advances.
    Point,
    /// Wait for the player to slide one of the enabled tiles.
    AwaitMove(&'static [usize]),
    /// Script complete: unlock level 1 and offer navigation onward.
    Finish,
}

/// One step of the tutorial script.
#[derive(Debug, Clone, Copy)]
pub struct TutorialStep {
    text: &'static str,
    action: StepAction,
    highlight: &'static [usize],
}

impl TutorialStep {
    /// Instruction text shown for this step.
    pub fn text(&self) -> &'static str {
        self.text
    }

    /// Action the presentation layer should take.
    pub fn action(&self) -> StepAction {
        self.action
    }

    /// Tile indices to highlight, if any.
    pub fn highlight(&self) -> &'static [usize] {
        self.highlight
    }
}

const STEPS: &[TutorialStep] = &[
    TutorialStep {
        text: "Welcome to Slide Puzzle! The goal is to put the tiles in order. \
               Press Enter to start the tutorial.",
        action: StepAction::Explain,
        highlight: &[],
    },
    TutorialStep {
        text: "You can only move a tile that sits next to the blank square. \
               The blank is at the bottom right.",
        action: StepAction::Point,
        highlight: &[2],
    },
    TutorialStep {
        text: "Slide the highlighted tile into the blank!",
        action: StepAction::AwaitMove(&[2]),
        highlight: &[2],
    },
    TutorialStep {
        text: "Great! One more move solves the puzzle.",
        action: StepAction::AwaitMove(&[3]),
        highlight: &[3],
    },
    TutorialStep {
        text: "Congratulations, you finished the tutorial! Level 1 is now \
               unlocked.",
        action: StepAction::Finish,
        highlight: &[],
    },
];

/// Linear script runner owning the 2×2 practice board.
#[derive(Debug)]
pub struct Tutorial {
    board: Board,
    current: usize,
}

impl Tutorial {
    /// Starts the script on the fixed `[1, 2, 3, 0]` board.
    #[instrument]
    pub fn new() -> Self {
        let board = Board::from_tiles(vec![1, 2, 3, 0]).expect("fixed tutorial board is valid");
        Self { board, current: 0 }
    }

    /// The practice board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Index of the current step.
    pub fn current_step(&self) -> usize {
        self.current
    }

    /// Total number of steps in the script.
    pub fn step_count() -> usize {
        STEPS.len()
    }

    /// The current step.
    pub fn step(&self) -> &'static TutorialStep {
        &STEPS[self.current]
    }

    /// Whether the script has reached its final step.
    pub fn is_finished(&self) -> bool {
        self.current == STEPS.len() - 1
    }

    /// Moves to the next step.
    ///
    /// Past the last step this is a no-op and the last step stays
    /// displayed.
    #[instrument(skip(self))]
    pub fn advance(&mut self) {
        if self.current + 1 < STEPS.len() {
            self.current += 1;
            debug!(step = self.current, "Tutorial advanced");
        }
    }

    /// Attempts the guided move at `index`.
    ///
    /// Accepted only when the current step awaits a move on that index and
    /// the tile is adjacent to the blank under the board's own rule. An
    /// accepted move is applied and auto-advances the script. Returns
    /// whether the move was applied.
    #[instrument(skip(self))]
    pub fn try_move(&mut self, index: usize) -> bool {
        let StepAction::AwaitMove(enabled) = self.step().action() else {
            debug!(index, "No move expected at this step");
            return false;
        };
        if !enabled.contains(&index) {
            debug!(index, "Tile not enabled for this step");
            return false;
        }
        if self.board.apply_move(index).is_err() {
            debug!(index, "Tile not adjacent to the blank");
            return false;
        }
        self.advance();
        info!(index, step = self.current, "Tutorial move accepted");
        true
    }

    /// Final-step side effect: ensures at least level 1 is unlocked.
    ///
    /// Goes through the store's monotonic setter, so replaying the
    /// tutorial never regresses progress.
    #[instrument(skip(self, store))]
    pub fn finish<S: KvStorage>(&self, store: &ProgressStore<S>) {
        if let Err(err) = store.set_unlocked_level(1) {
            tracing::warn!(%err, "Failed to persist tutorial unlock");
        }
    }
}

impl Default for Tutorial {
    fn default() -> Self {
        Self::new()
    }
}

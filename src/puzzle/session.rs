//! Game session state machine.
//!
//! A session owns the board for one attempt at a level plus the move
//! counter, elapsed time, phase, and the tick source. All mutation happens
//! synchronously through [`GameSession::request_move`],
//! [`GameSession::tick`], and [`GameSession::reshuffle`]; the owning screen
//! discards the session on navigation.

use std::time::{Duration, Instant};

use derive_getters::Getters;
use rand::{Rng, thread_rng};
use tracing::{debug, info, instrument, warn};

use crate::levels::{LEVEL_COUNT, LevelConfig};
use crate::puzzle::board::Board;
use crate::puzzle::shuffle::shuffle;
use crate::store::{HighscoreRecord, KvStorage, ProgressStore};

/// Phase of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Board built and shuffled, no move or tick yet.
    Ready,
    /// At least one move or tick has happened.
    InProgress,
    /// Board reached the canonical configuration; terminal until reshuffle.
    Solved,
}

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The request was not a legal move; nothing changed.
    Ignored,
    /// The tile slid into the blank.
    Moved,
    /// The move completed the puzzle.
    Solved,
}

/// Cancellable 1-second tick source owned by a session.
///
/// [`Ticker::poll`] reports how many whole periods elapsed since the last
/// poll; a stopped ticker reports none. Every lifecycle transition that
/// must invalidate the old tick source does so through [`Ticker::stop`].
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    period: Duration,
    due: Option<Instant>,
}

impl Ticker {
    /// Creates a stopped ticker with a 1-second period.
    pub fn stopped() -> Self {
        Self {
            period: Duration::from_secs(1),
            due: None,
        }
    }

    /// Starts (or restarts) the ticker; the first tick comes due one
    /// period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.due = Some(now + self.period);
    }

    /// Stops the ticker; subsequent polls report no ticks.
    pub fn stop(&mut self) {
        self.due = None;
    }

    /// Whether the ticker is running.
    pub fn is_running(&self) -> bool {
        self.due.is_some()
    }

    /// Number of whole periods elapsed up to `now`, advancing the
    /// deadline past `now`.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.due else {
            return 0;
        };
        let mut ticks = 0;
        while now >= due {
            ticks += 1;
            due += self.period;
        }
        self.due = Some(due);
        ticks
    }
}

/// What happened when a session was solved.
#[derive(Debug, Clone, Getters)]
pub struct SolveSummary {
    /// The result that was submitted.
    score: HighscoreRecord,
    /// Whether the result replaced the stored highscore.
    is_best: bool,
    /// The highscore on record before this solve.
    previous: Option<HighscoreRecord>,
    /// Level offered for the follow-up auto-advance, if any.
    next_level: Option<u8>,
}

/// Snapshot of everything a renderer needs for one frame.
///
/// The presentation layer draws from this and calls back into
/// [`GameSession::request_move`] on user interaction.
#[derive(Debug, Clone)]
pub struct RenderState {
    tiles: Vec<u32>,
    size: usize,
    blank: usize,
    legal_moves: Vec<usize>,
    move_count: u32,
    elapsed_seconds: u32,
    solved: bool,
}

impl RenderState {
    /// Tiles in row-major order; `0` is the blank.
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    /// Board edge length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Linear index of the blank.
    pub fn blank(&self) -> usize {
        self.blank
    }

    /// Indices currently allowed to slide into the blank.
    pub fn legal_moves(&self) -> &[usize] {
        &self.legal_moves
    }

    /// Moves applied so far.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Seconds elapsed so far.
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Whether the board is in the canonical configuration.
    pub fn solved(&self) -> bool {
        self.solved
    }
}

/// One attempt at a level: board, counters, phase, and tick source.
#[derive(Debug)]
pub struct GameSession {
    level: u8,
    config: LevelConfig,
    board: Board,
    move_count: u32,
    elapsed_seconds: u32,
    phase: SessionPhase,
    ticker: Ticker,
}

impl GameSession {
    /// Starts a session with the thread RNG.
    #[instrument(skip(config), fields(size = config.size(), shuffle = config.shuffle_moves()))]
    pub fn new(level: u8, config: LevelConfig) -> Self {
        Self::new_with_rng(level, config, &mut thread_rng())
    }

    /// Starts a session, shuffling with the provided generator.
    pub fn new_with_rng<R: Rng + ?Sized>(level: u8, config: LevelConfig, rng: &mut R) -> Self {
        let mut board = Board::solved(config.size());
        shuffle(&mut board, config.shuffle_moves(), rng);
        let mut ticker = Ticker::stopped();
        if config.timer_enabled() {
            ticker.start(Instant::now());
        }
        info!(level, size = config.size(), "Starting game session");
        Self {
            level,
            config,
            board,
            move_count: 0,
            elapsed_seconds: 0,
            phase: SessionPhase::Ready,
            ticker,
        }
    }

    /// Level id this session plays.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// The level configuration.
    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// The board being played.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves applied so far.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Seconds elapsed so far.
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whether the session has reached the solved phase.
    pub fn is_solved(&self) -> bool {
        self.phase == SessionPhase::Solved
    }

    /// Snapshot for the presentation layer.
    pub fn render_state(&self) -> RenderState {
        RenderState {
            tiles: self.board.tiles().to_vec(),
            size: self.board.size(),
            blank: self.board.blank(),
            legal_moves: self.board.legal_moves(),
            move_count: self.move_count,
            elapsed_seconds: self.elapsed_seconds,
            solved: self.phase == SessionPhase::Solved,
        }
    }

    /// Resets counters and regenerates the board for another attempt.
    #[instrument(skip(self))]
    pub fn reshuffle(&mut self) {
        self.reshuffle_with_rng(&mut thread_rng());
    }

    /// Reshuffles with the provided generator.
    pub fn reshuffle_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        // Invalidate the old tick source before a new one starts.
        self.ticker.stop();
        self.board = Board::solved(self.config.size());
        shuffle(&mut self.board, self.config.shuffle_moves(), rng);
        self.move_count = 0;
        self.elapsed_seconds = 0;
        self.phase = SessionPhase::Ready;
        if self.config.timer_enabled() {
            self.ticker.start(Instant::now());
        }
        info!(level = self.level, "Session reshuffled");
    }

    /// Advances the clock by one second.
    ///
    /// No-op unless the level has a timer and the puzzle is unsolved.
    pub fn tick(&mut self) {
        if !self.config.timer_enabled() || self.phase == SessionPhase::Solved {
            return;
        }
        self.elapsed_seconds += 1;
        if self.phase == SessionPhase::Ready {
            self.phase = SessionPhase::InProgress;
        }
    }

    /// Applies the ticks that have come due on the session's tick source.
    ///
    /// Driven once per iteration by the owning event loop. Returns whether
    /// the displayed time changed.
    pub fn poll_tick(&mut self, now: Instant) -> bool {
        let due = self.ticker.poll(now);
        for _ in 0..due {
            self.tick();
        }
        due > 0
    }

    /// Requests that the tile at `index` slide into the blank.
    ///
    /// Illegal requests are ignored rather than surfaced; the caller's
    /// rendering simply does not change. A solving move stops the tick
    /// source and makes the session terminal until the next reshuffle.
    #[instrument(skip(self), fields(level = self.level))]
    pub fn request_move(&mut self, index: usize) -> MoveOutcome {
        if self.phase == SessionPhase::Solved {
            debug!(index, "Move requested after solve; ignoring");
            return MoveOutcome::Ignored;
        }
        if let Err(err) = self.board.apply_move(index) {
            debug!(%err, "Ignoring illegal move");
            return MoveOutcome::Ignored;
        }
        self.move_count += 1;
        self.phase = SessionPhase::InProgress;
        if self.board.is_solved() {
            self.ticker.stop();
            self.phase = SessionPhase::Solved;
            info!(
                level = self.level,
                moves = self.move_count,
                seconds = self.elapsed_seconds,
                "Puzzle solved"
            );
            return MoveOutcome::Solved;
        }
        MoveOutcome::Moved
    }

    /// Records the solved result and computes what happens next.
    ///
    /// Call once after [`MoveOutcome::Solved`]: submits the score, raises
    /// the unlock level for levels 1 through 4, and names the follow-up
    /// level for the auto-advance offer. Store failures are logged and
    /// degrade to "not a best"; they never abort the game.
    #[instrument(skip(self, store), fields(level = self.level))]
    pub fn solve_summary<S: KvStorage>(&self, store: &ProgressStore<S>) -> SolveSummary {
        debug_assert_eq!(self.phase, SessionPhase::Solved);
        let score = HighscoreRecord::new(
            self.move_count,
            self.config.timer_enabled().then_some(self.elapsed_seconds),
        );
        let previous = store.highscore(self.level);
        let is_best = match store.submit_score(self.level, &score, self.config.timer_enabled()) {
            Ok(best) => best,
            Err(err) => {
                warn!(%err, "Failed to persist highscore");
                false
            }
        };
        if (1..LEVEL_COUNT).contains(&self.level) {
            if let Err(err) = store.set_unlocked_level(self.level + 1) {
                warn!(%err, "Failed to persist unlock level");
            }
        }
        let next_level = (self.level < LEVEL_COUNT).then_some(self.level + 1);
        SolveSummary {
            score,
            is_best,
            previous,
            next_level,
        }
    }
}

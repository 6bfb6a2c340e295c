//! Random-walk shuffle for puzzle boards.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::instrument;

use super::board::Board;

/// Applies `times` uniformly random legal moves to `board`.
///
/// Naive random walk: each step picks uniformly among the current legal
/// moves, with no duplicate avoidance, so states may be revisited. Because
/// every step is a single legal swap, a board shuffled from the solved
/// state keeps its solvability parity and can always be solved again.
/// `times == 0` leaves the board unchanged.
#[instrument(skip(board, rng), fields(size = board.size()))]
pub fn shuffle<R: Rng + ?Sized>(board: &mut Board, times: u32, rng: &mut R) {
    for _ in 0..times {
        let moves = board.legal_moves();
        if let Some(&index) = moves.choose(rng) {
            board
                .apply_move(index)
                .expect("index drawn from legal_moves");
        }
    }
}

//! Tests for the shuffle generator.

use rand::SeedableRng;
use rand::rngs::StdRng;
use slide_puzzle::{Board, shuffle};

fn count_inversions(tiles: &[u32]) -> usize {
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value != 0)
        .map(|(i, &value)| {
            tiles[i + 1..]
                .iter()
                .filter(|&&next| next != 0 && next < value)
                .count()
        })
        .sum()
}

/// Classic solvability invariant relative to the canonical solved state.
///
/// Odd sizes: solvable iff the inversion count is even. Even sizes: the
/// blank's row from the top joins the parity.
fn is_solvable(board: &Board) -> bool {
    let inversions = count_inversions(board.tiles());
    if board.size() % 2 == 1 {
        inversions % 2 == 0
    } else {
        (inversions + board.row(board.blank())) % 2 == 1
    }
}

#[test]
fn test_zero_times_leaves_board_unchanged() {
    let mut board = Board::solved(3);
    let mut rng = StdRng::seed_from_u64(7);
    shuffle(&mut board, 0, &mut rng);
    assert!(board.is_solved());
}

#[test]
fn test_shuffle_preserves_tile_multiset() {
    let mut board = Board::solved(4);
    let mut rng = StdRng::seed_from_u64(42);
    shuffle(&mut board, 100, &mut rng);

    let mut tiles: Vec<u32> = board.tiles().to_vec();
    tiles.sort_unstable();
    let expected: Vec<u32> = (0..16).collect();
    assert_eq!(tiles, expected);
    assert_eq!(board.tiles()[board.blank()], 0);
}

#[test]
fn test_shuffled_boards_stay_solvable() {
    for seed in 0..20 {
        for size in [3, 4, 5] {
            let mut board = Board::solved(size);
            let mut rng = StdRng::seed_from_u64(seed);
            shuffle(&mut board, 60, &mut rng);
            assert!(is_solvable(&board), "seed {seed}, size {size}");
        }
    }
}

#[test]
fn test_single_move_shuffle_stays_next_to_home() {
    let mut board = Board::solved(3);
    let mut rng = StdRng::seed_from_u64(1);
    shuffle(&mut board, 1, &mut rng);

    // One legal move always changes the board, and the displaced tile
    // (now in the blank's home corner) must be movable straight back.
    assert!(!board.is_solved());
    assert!(board.legal_moves().contains(&8));
}

#[test]
fn test_seeded_shuffle_is_reproducible() {
    let mut a = Board::solved(4);
    let mut b = Board::solved(4);
    shuffle(&mut a, 35, &mut StdRng::seed_from_u64(9));
    shuffle(&mut b, 35, &mut StdRng::seed_from_u64(9));
    assert_eq!(a, b);
}

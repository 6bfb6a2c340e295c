//! Board model for the sliding-tile puzzle.
//!
//! A board is an ordered sequence of `size * size` tile values in row-major
//! order: `1..=size²-1` are numbered tiles and exactly one `0` is the blank.
//! The blank position is redundant with the sequence but cached for O(1)
//! legal-move queries.

use derive_more::{Display, Error};
use tracing::instrument;

/// Smallest playable board edge.
pub const MIN_SIZE: usize = 2;

/// Error returned when a requested move cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The index is out of bounds, targets the blank itself, or is not
    /// orthogonally adjacent to the blank.
    #[display("illegal move: tile index {index} cannot slide into the blank")]
    IllegalMove {
        /// The rejected tile index.
        index: usize,
    },
}

/// Row-major tile sequence with a cached blank index.
///
/// Invariant: every value in `0..size²` appears exactly once and
/// `tiles[blank] == 0`. Positions are linear indices; `row = idx / size`,
/// `col = idx % size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    tiles: Vec<u32>,
    blank: usize,
}

impl Board {
    /// Creates the solved board `[1, 2, …, size²-1, 0]` with the blank at
    /// the last index.
    ///
    /// Sizes below [`MIN_SIZE`] are clamped rather than rejected.
    #[instrument]
    pub fn solved(size: usize) -> Self {
        let size = size.max(MIN_SIZE);
        let cells = size * size;
        let mut tiles: Vec<u32> = (1..cells as u32).collect();
        tiles.push(0);
        Self {
            size,
            tiles,
            blank: cells - 1,
        }
    }

    /// Builds a board from an explicit tile sequence.
    ///
    /// Returns `None` unless `tiles` is a permutation of `0..len` with a
    /// square length of at least [`MIN_SIZE`]².
    pub fn from_tiles(tiles: Vec<u32>) -> Option<Self> {
        let len = tiles.len();
        let size = (len as f64).sqrt().round() as usize;
        if size < MIN_SIZE || size * size != len {
            return None;
        }
        let mut seen = vec![false; len];
        for &tile in &tiles {
            let tile = tile as usize;
            if tile >= len || seen[tile] {
                return None;
            }
            seen[tile] = true;
        }
        let blank = tiles.iter().position(|&t| t == 0)?;
        Some(Self { size, tiles, blank })
    }

    /// Board edge length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Tiles in row-major order; `0` is the blank.
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    /// Linear index of the blank.
    pub fn blank(&self) -> usize {
        self.blank
    }

    /// Row of a linear index.
    pub fn row(&self, index: usize) -> usize {
        index / self.size
    }

    /// Column of a linear index.
    pub fn col(&self, index: usize) -> usize {
        index % self.size
    }

    /// Indices of tiles that may slide into the blank.
    ///
    /// Orthogonal neighbors only: left/right are excluded at row boundaries
    /// so moves never wrap across rows, up/down are excluded by range.
    pub fn legal_moves(&self) -> Vec<usize> {
        let idx = self.blank;
        let size = self.size;
        let mut moves = Vec::with_capacity(4);
        if idx % size != 0 {
            moves.push(idx - 1);
        }
        if (idx + 1) % size != 0 {
            moves.push(idx + 1);
        }
        if idx >= size {
            moves.push(idx - size);
        }
        if idx + size < size * size {
            moves.push(idx + size);
        }
        moves
    }

    /// Slides the tile at `index` into the blank and updates the cached
    /// blank position. The swap is atomic from the caller's view.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::IllegalMove`] if `index` is out of bounds, is
    /// the blank itself, or is not adjacent to the blank.
    #[instrument(skip(self), fields(blank = self.blank))]
    pub fn apply_move(&mut self, index: usize) -> Result<(), MoveError> {
        if index >= self.tiles.len()
            || index == self.blank
            || !self.legal_moves().contains(&index)
        {
            return Err(MoveError::IllegalMove { index });
        }
        self.tiles.swap(index, self.blank);
        self.blank = index;
        Ok(())
    }

    /// True for the single canonical configuration `[1, 2, …, size²-1, 0]`.
    pub fn is_solved(&self) -> bool {
        let last = self.tiles.len() - 1;
        self.tiles[..last]
            .iter()
            .enumerate()
            .all(|(i, &tile)| tile as usize == i + 1)
            && self.tiles[last] == 0
    }
}

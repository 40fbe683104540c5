//! Puzzles: 5x5 grids with a point reward and a reward piece.
//!
//! ## Cell
//!
//! A closed sum type instead of raw integers. A flat integer encoding would
//! let the border value collide with the 1-cell piece's id and corrupt the
//! piece-return accounting when a puzzle completes; the enum makes that
//! collision unrepresentable.
//!
//! ## Grid keys
//!
//! The memoization tables key on grid *contents*, not puzzle identity: two
//! distinct puzzle instances with the same remaining shape share cache
//! entries. [`Puzzle::grid_key`] flattens the grid into a hashable array for
//! that purpose.

use serde::{Deserialize, Serialize};

use crate::pieces::{offsets, PieceKind, Rotation};

pub mod templates;

/// Side length of every puzzle grid.
pub const GRID_SIZE: usize = 5;

/// One cell of a puzzle grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Fillable, currently unoccupied.
    Empty,
    /// Pre-filled border; never fillable, never returned to anyone.
    Border,
    /// Occupied by a placed piece of the given kind.
    Piece(PieceKind),
}

impl Cell {
    /// Wire encoding: 0 empty, 1 border, 1 + piece id for placed pieces.
    ///
    /// The offset keeps the border value from colliding with the Dot id.
    #[must_use]
    pub const fn wire_value(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Border => 1,
            Cell::Piece(kind) => 1 + kind.id(),
        }
    }
}

/// The flattened grid contents, used as a structural cache key.
pub type GridKey = [Cell; GRID_SIZE * GRID_SIZE];

/// A puzzle instance: grid, point value, reward piece.
///
/// `points` and `reward` are fixed at template instantiation; only the grid
/// mutates as pieces are placed. Cloning deep-copies the grid, which is what
/// speculative evaluation relies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Puzzle {
    pub grid: [[Cell; GRID_SIZE]; GRID_SIZE],
    pub points: i32,
    pub reward: PieceKind,
}

impl Puzzle {
    /// Number of empty (fillable) cells remaining.
    #[must_use]
    pub fn empty_cells(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|&&c| c == Cell::Empty)
            .count()
    }

    /// True once no fillable cell remains.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.empty_cells() == 0
    }

    /// The structural cache key for the current grid contents.
    #[must_use]
    pub fn grid_key(&self) -> GridKey {
        let mut key = [Cell::Empty; GRID_SIZE * GRID_SIZE];
        for (i, row) in self.grid.iter().enumerate() {
            key[i * GRID_SIZE..(i + 1) * GRID_SIZE].copy_from_slice(row);
        }
        key
    }

    /// The absolute cells a piece would cover, anchored at `(x, y)`.
    ///
    /// Returns `None` if any covered cell falls outside the grid.
    #[must_use]
    pub fn footprint_cells(
        x: u8,
        y: u8,
        kind: PieceKind,
        rotation: Rotation,
        reflected: bool,
    ) -> Option<Vec<(usize, usize)>> {
        let mut cells = Vec::with_capacity(kind.footprint() as usize);
        for &(dx, dy) in offsets(kind, rotation, reflected) {
            let cx = x as i16 + dx as i16;
            let cy = y as i16 + dy as i16;
            if !(0..GRID_SIZE as i16).contains(&cx) || !(0..GRID_SIZE as i16).contains(&cy) {
                return None;
            }
            cells.push((cx as usize, cy as usize));
        }
        Some(cells)
    }

    /// Check whether a piece fits: all covered cells in bounds and empty.
    #[must_use]
    pub fn fits(&self, x: u8, y: u8, kind: PieceKind, rotation: Rotation, reflected: bool) -> bool {
        match Self::footprint_cells(x, y, kind, rotation, reflected) {
            Some(cells) => cells.iter().all(|&(cx, cy)| self.grid[cx][cy] == Cell::Empty),
            None => false,
        }
    }

    /// Write a piece into the grid. The caller must have checked [`fits`].
    ///
    /// [`fits`]: Puzzle::fits
    pub(crate) fn place(
        &mut self,
        x: u8,
        y: u8,
        kind: PieceKind,
        rotation: Rotation,
        reflected: bool,
    ) {
        let cells = Self::footprint_cells(x, y, kind, rotation, reflected)
            .expect("place called with out-of-bounds footprint");
        for (cx, cy) in cells {
            debug_assert_eq!(self.grid[cx][cy], Cell::Empty);
            self.grid[cx][cy] = Cell::Piece(kind);
        }
    }

    /// Count placed cells per kind, in catalog order.
    #[must_use]
    pub fn placed_cell_counts(&self) -> [u32; PieceKind::COUNT] {
        let mut counts = [0u32; PieceKind::COUNT];
        for cell in self.grid.iter().flatten() {
            if let Cell::Piece(kind) = cell {
                counts[kind.index()] += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::templates::white_templates;
    use super::*;

    fn open_puzzle() -> Puzzle {
        // 2x2 + one extra empty cell, from the white deck.
        white_templates()[0].clone()
    }

    #[test]
    fn test_empty_cells_counts_only_empty() {
        let puzzle = open_puzzle();
        assert_eq!(puzzle.empty_cells(), 7);
        assert!(!puzzle.is_complete());
    }

    #[test]
    fn test_fits_rejects_border_and_out_of_bounds() {
        let puzzle = open_puzzle();
        // (0, 0) is border in every template.
        assert!(!puzzle.fits(0, 0, PieceKind::Dot, Rotation::Up, false));
        // Anchoring a vertical I4 at the bottom row runs off the grid.
        assert!(!puzzle.fits(4, 1, PieceKind::Red, Rotation::Up, false));
    }

    #[test]
    fn test_place_then_complete_accounting() {
        let mut puzzle = open_puzzle();
        let before = puzzle.empty_cells();
        assert!(puzzle.fits(1, 1, PieceKind::Green, Rotation::Up, false));
        puzzle.place(1, 1, PieceKind::Green, Rotation::Up, false);

        assert_eq!(puzzle.empty_cells(), before - 2);
        let counts = puzzle.placed_cell_counts();
        assert_eq!(counts[PieceKind::Green.index()], 2);
        assert_eq!(counts.iter().sum::<u32>(), 2);
    }

    #[test]
    fn test_grid_key_is_structural() {
        let a = open_puzzle();
        let mut b = open_puzzle();
        b.points = 99;
        b.reward = PieceKind::Red;
        // Same grid contents, different metadata: same key.
        assert_eq!(a.grid_key(), b.grid_key());

        let mut c = open_puzzle();
        c.place(1, 1, PieceKind::Dot, Rotation::Up, false);
        assert_ne!(a.grid_key(), c.grid_key());
    }

    #[test]
    fn test_wire_values_do_not_collide() {
        let mut seen = std::collections::HashSet::new();
        assert!(seen.insert(Cell::Empty.wire_value()));
        assert!(seen.insert(Cell::Border.wire_value()));
        for kind in PieceKind::ALL {
            assert!(seen.insert(Cell::Piece(kind).wire_value()));
        }
    }
}

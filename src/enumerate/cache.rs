//! Memoization tables behind the enumerator.
//!
//! ## Placement table
//!
//! Keyed by `(kind, grid contents)`: the legal anchor/orientation spots for
//! one piece kind on one grid. The key is structural, so two puzzle
//! instances with the same remaining shape share an entry, and entries stay
//! valid forever (a grid's legal spots depend on nothing else).
//!
//! ## Composite table
//!
//! Keyed by `(inventory, owned grid contents in order)`: the candidate
//! placement lists for the master action. Turn-local facts (whether the
//! master action is still available this turn, the phase) are *not* part of
//! the key; every cached candidate is re-validated through
//! [`step`](crate::core::GameState::step) before it is reported, so a stale
//! candidate costs a clone, never a wrong answer.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::Placement;
use crate::pieces::{PieceCounts, PieceKind, Rotation};
use crate::puzzles::{Cell, GridKey, Puzzle, GRID_SIZE};

/// One legal spot: anchor, rotation, reflection.
pub type Spot = (u8, u8, Rotation, bool);

/// Per-kind, per-grid legal placement table.
#[derive(Debug, Default)]
pub struct PlacementCache {
    table: FxHashMap<(PieceKind, GridKey), Vec<Spot>>,
}

impl PlacementCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached `(kind, grid)` entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The legal spots for `kind` on this grid, computed on first use.
    ///
    /// Spots are ordered by anchor (row-major), then rotation, then
    /// reflection. Rotation-invariant kinds contribute only `Up`;
    /// non-reflectable kinds only `reflected = false`.
    pub fn spots(&mut self, kind: PieceKind, puzzle: &Puzzle) -> &[Spot] {
        self.table
            .entry((kind, puzzle.grid_key()))
            .or_insert_with(|| compute_spots(kind, puzzle))
    }
}

fn compute_spots(kind: PieceKind, puzzle: &Puzzle) -> Vec<Spot> {
    let rotations: &[Rotation] = if kind.rotation_invariant() {
        &Rotation::ALL[..1]
    } else {
        &Rotation::ALL
    };
    let reflections: &[bool] = if kind.reflectable() {
        &[false, true]
    } else {
        &[false]
    };

    // The anchor is always the shape's first cell in row-major order, so
    // scanning empty cells yields each fit exactly once.
    let mut spots = Vec::new();
    for x in 0..GRID_SIZE as u8 {
        for y in 0..GRID_SIZE as u8 {
            if puzzle.grid[x as usize][y as usize] != Cell::Empty {
                continue;
            }
            for &rotation in rotations {
                for &reflected in reflections {
                    if puzzle.fits(x, y, kind, rotation, reflected) {
                        spots.push((x, y, rotation, reflected));
                    }
                }
            }
        }
    }
    spots
}

/// One master-action candidate: one placement per owned puzzle.
pub type Composite = SmallVec<[Placement; 4]>;

type CompositeKey = ([u32; PieceKind::COUNT], Vec<GridKey>);

/// Master-action candidate table, keyed by inventory and owned grids.
#[derive(Debug, Default)]
pub struct CompositeCache {
    table: FxHashMap<CompositeKey, Vec<Composite>>,
}

impl CompositeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached `(inventory, grids)` entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// All candidate master placement lists for this inventory and these
    /// puzzles, computed on first use.
    ///
    /// Candidates are ordered by the kind assignment (catalog order per
    /// puzzle, first puzzle outermost), then by each puzzle's spot order.
    pub fn composites(
        &mut self,
        pieces: &PieceCounts,
        puzzles: &[Puzzle],
        spots: &mut PlacementCache,
    ) -> &[Composite] {
        let key = (
            pieces.as_array(),
            puzzles.iter().map(Puzzle::grid_key).collect::<Vec<_>>(),
        );
        self.table
            .entry(key)
            .or_insert_with(|| compute_composites(pieces, puzzles, spots))
    }
}

fn compute_composites(
    pieces: &PieceCounts,
    puzzles: &[Puzzle],
    spots: &mut PlacementCache,
) -> Vec<Composite> {
    let mut out = Vec::new();
    let mut remaining = *pieces;
    let mut assignment: SmallVec<[PieceKind; 4]> = SmallVec::new();
    assign_kinds(puzzles, spots, &mut remaining, &mut assignment, &mut out);
    out
}

/// Assign one piece kind per puzzle, never exceeding the inventory.
fn assign_kinds(
    puzzles: &[Puzzle],
    spots: &mut PlacementCache,
    remaining: &mut PieceCounts,
    assignment: &mut SmallVec<[PieceKind; 4]>,
    out: &mut Vec<Composite>,
) {
    if assignment.len() == puzzles.len() {
        expand_assignment(puzzles, spots, assignment, out);
        return;
    }
    for kind in PieceKind::ALL {
        if remaining[kind] == 0 {
            continue;
        }
        remaining[kind] -= 1;
        assignment.push(kind);
        assign_kinds(puzzles, spots, remaining, assignment, out);
        assignment.pop();
        remaining[kind] += 1;
    }
}

/// Cartesian product of per-puzzle spots for one kind assignment.
fn expand_assignment(
    puzzles: &[Puzzle],
    spots: &mut PlacementCache,
    assignment: &[PieceKind],
    out: &mut Vec<Composite>,
) {
    let mut lists: SmallVec<[Vec<Spot>; 4]> = SmallVec::new();
    for (puzzle, &kind) in puzzles.iter().zip(assignment) {
        let list = spots.spots(kind, puzzle);
        if list.is_empty() {
            return;
        }
        lists.push(list.to_vec());
    }

    let mut chosen: Composite = SmallVec::new();
    product(&lists, assignment, &mut chosen, out);
}

fn product(
    lists: &[Vec<Spot>],
    assignment: &[PieceKind],
    chosen: &mut Composite,
    out: &mut Vec<Composite>,
) {
    let depth = chosen.len();
    if depth == lists.len() {
        out.push(chosen.clone());
        return;
    }
    for &(x, y, rotation, reflected) in &lists[depth] {
        chosen.push(Placement {
            puzzle: depth,
            piece: assignment[depth],
            x,
            y,
            rotation,
            reflected,
        });
        product(lists, assignment, chosen, out);
        chosen.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzles::templates::white_templates;

    #[test]
    fn test_dot_spots_are_the_empty_cells() {
        let mut cache = PlacementCache::new();
        let puzzle = white_templates()[0].clone();

        let spots = cache.spots(PieceKind::Dot, &puzzle).to_vec();
        assert_eq!(spots.len(), puzzle.empty_cells());

        // Row-major anchor order, canonical orientation only.
        let mut last = None;
        for &(x, y, rotation, reflected) in &spots {
            assert_eq!(rotation, Rotation::Up);
            assert!(!reflected);
            let pos = (x, y);
            assert!(Some(pos) > last);
            last = Some(pos);
        }
    }

    #[test]
    fn test_spots_shared_across_identical_grids() {
        let mut cache = PlacementCache::new();
        let a = white_templates()[0].clone();
        let mut b = a.clone();
        b.points = 99;

        let first = cache.spots(PieceKind::Green, &a).to_vec();
        let second = cache.spots(PieceKind::Green, &b).to_vec();

        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_spots_all_fit_and_are_distinct() {
        let mut cache = PlacementCache::new();
        let puzzle = white_templates()[0].clone();

        for kind in PieceKind::ALL {
            let spots = cache.spots(kind, &puzzle).to_vec();
            let mut seen = std::collections::HashSet::new();
            for &(x, y, rotation, reflected) in &spots {
                assert!(puzzle.fits(x, y, kind, rotation, reflected));
                assert!(seen.insert((x, y, rotation, reflected)));
            }
        }
    }

    #[test]
    fn test_full_grid_has_no_spots_for_any_kind() {
        let mut cache = PlacementCache::new();
        let mut puzzle = white_templates()[5].clone();
        puzzle.place(2, 1, PieceKind::TShape, Rotation::Up, false);
        assert!(puzzle.is_complete());

        for kind in PieceKind::ALL {
            assert!(cache.spots(kind, &puzzle).is_empty());
        }
    }

    #[test]
    fn test_composites_cover_each_puzzle_once() {
        let mut spots = PlacementCache::new();
        let mut cache = CompositeCache::new();
        let puzzles = vec![white_templates()[0].clone(), white_templates()[3].clone()];
        let mut pieces = PieceCounts::new();
        pieces[PieceKind::Dot] = 2;

        let composites = cache.composites(&pieces, &puzzles, &mut spots).to_vec();
        assert!(!composites.is_empty());

        for composite in &composites {
            assert_eq!(composite.len(), 2);
            assert_eq!(composite[0].puzzle, 0);
            assert_eq!(composite[1].puzzle, 1);
            for placement in composite {
                assert_eq!(placement.piece, PieceKind::Dot);
            }
        }
    }

    #[test]
    fn test_composites_respect_inventory_multiset() {
        let mut spots = PlacementCache::new();
        let mut cache = CompositeCache::new();
        let puzzles = vec![white_templates()[0].clone(), white_templates()[3].clone()];
        let mut pieces = PieceCounts::new();
        pieces[PieceKind::Dot] = 1;
        pieces[PieceKind::Green] = 1;

        let composites = cache.composites(&pieces, &puzzles, &mut spots).to_vec();

        // A single Dot cannot be assigned to both puzzles.
        for composite in &composites {
            let mut usage = PieceCounts::new();
            for placement in composite {
                usage[placement.piece] += 1;
            }
            for (kind, used) in usage.iter() {
                assert!(used <= pieces[kind]);
            }
        }
        assert!(composites
            .iter()
            .any(|c| c[0].piece == PieceKind::Dot && c[1].piece == PieceKind::Green));
        assert!(!composites
            .iter()
            .any(|c| c[0].piece == PieceKind::Dot && c[1].piece == PieceKind::Dot));
    }

    #[test]
    fn test_composite_key_includes_inventory() {
        let mut spots = PlacementCache::new();
        let mut cache = CompositeCache::new();
        let puzzles = vec![white_templates()[0].clone()];

        let mut one_dot = PieceCounts::new();
        one_dot[PieceKind::Dot] = 1;
        let mut one_green = PieceCounts::new();
        one_green[PieceKind::Green] = 1;

        let with_dot = cache.composites(&one_dot, &puzzles, &mut spots).to_vec();
        let with_green = cache.composites(&one_green, &puzzles, &mut spots).to_vec();

        assert_eq!(cache.len(), 2);
        assert!(with_dot.iter().all(|c| c[0].piece == PieceKind::Dot));
        assert!(with_green.iter().all(|c| c[0].piece == PieceKind::Green));
    }

    #[test]
    fn test_empty_inventory_yields_no_composites() {
        let mut spots = PlacementCache::new();
        let mut cache = CompositeCache::new();
        let puzzles = vec![white_templates()[0].clone()];

        let composites = cache
            .composites(&PieceCounts::new(), &puzzles, &mut spots)
            .to_vec();
        assert!(composites.is_empty());
    }
}

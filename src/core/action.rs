//! Action representation: a closed sum type over the six action kinds.
//!
//! Each variant carries a strongly-typed payload, so resolver dispatch is an
//! exhaustive `match` and a missing action kind is a compile error rather
//! than a runtime surprise.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::pieces::{PieceKind, Rotation};

/// One piece placed into one of the acting player's puzzles.
///
/// `puzzle` indexes the player's own puzzle list; `(x, y)` is the anchor
/// cell, interpreted through the orientation tables in
/// [`pieces::shapes`](crate::pieces::shapes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub puzzle: usize,
    pub piece: PieceKind,
    pub x: u8,
    pub y: u8,
    pub rotation: Rotation,
    pub reflected: bool,
}

/// A complete game action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Draw one base single-cell piece from the bank.
    DrawBasic,
    /// Take the face-up puzzle in `slot` (0-3 black, 4-7 white).
    TakePuzzle { slot: u8 },
    /// Trade one owned piece for a bank piece of equal or one-larger
    /// footprint.
    UpgradePiece { from: PieceKind, to: PieceKind },
    /// Place one owned piece into one owned puzzle.
    PlacePiece(Placement),
    /// The once-per-turn master action: one placement into every owned
    /// puzzle, validated all-or-nothing.
    Master {
        /// One entry per owned puzzle. A player holds at most 4 puzzles,
        /// so the inline capacity avoids heap allocation.
        placements: SmallVec<[Placement; 4]>,
    },
    /// Final phase only: end the turn and pay the accumulated penalty.
    Stop,
}

impl Action {
    /// Build a master action from per-puzzle placements.
    #[must_use]
    pub fn master(placements: impl IntoIterator<Item = Placement>) -> Self {
        Action::Master {
            placements: placements.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::DrawBasic => write!(f, "draw basic piece"),
            Action::TakePuzzle { slot } => write!(f, "take puzzle from slot {slot}"),
            Action::UpgradePiece { from, to } => write!(f, "upgrade {from} -> {to}"),
            Action::PlacePiece(p) => write!(
                f,
                "place {} at ({}, {}) in puzzle {}",
                p.piece, p.x, p.y, p.puzzle
            ),
            Action::Master { placements } => {
                write!(f, "master action across {} puzzles", placements.len())
            }
            Action::Stop => write!(f, "stop"),
        }
    }
}

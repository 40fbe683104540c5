//! The piece catalog: nine fixed kinds of polyomino pieces.
//!
//! ## PieceKind
//!
//! Each kind has a numeric id (1-9, stable across the wire format), a
//! footprint (how many grid cells it covers, 1-4), and a precomputed
//! orientation table in [`shapes`].
//!
//! ## Orientations
//!
//! Every kind is addressed by a [`Rotation`] and a reflection flag. Two kinds
//! (Dot, Purple) are rotation-invariant; two kinds (LShape, Ladder) have a
//! distinct reflected shape. For all other kinds the reflection flag selects
//! the same offsets, so it is accepted but meaningless.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

pub mod shapes;

pub use shapes::offsets;

/// One of the nine piece kinds.
///
/// Declaration order is the catalog order used everywhere iteration order
/// matters (enumeration determinism, conservation accounting).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    Dot = 1,
    Green = 2,
    Corner = 3,
    Blue = 4,
    LShape = 5,
    Purple = 6,
    TShape = 7,
    Red = 8,
    Ladder = 9,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 9] = [
        PieceKind::Dot,
        PieceKind::Green,
        PieceKind::Corner,
        PieceKind::Blue,
        PieceKind::LShape,
        PieceKind::Purple,
        PieceKind::TShape,
        PieceKind::Red,
        PieceKind::Ladder,
    ];

    /// Number of kinds in the catalog.
    pub const COUNT: usize = 9;

    /// Stable numeric id (1-9), as used on the wire.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Look up a kind by its numeric id.
    #[must_use]
    pub const fn from_id(id: u8) -> Option<PieceKind> {
        match id {
            1 => Some(PieceKind::Dot),
            2 => Some(PieceKind::Green),
            3 => Some(PieceKind::Corner),
            4 => Some(PieceKind::Blue),
            5 => Some(PieceKind::LShape),
            6 => Some(PieceKind::Purple),
            7 => Some(PieceKind::TShape),
            8 => Some(PieceKind::Red),
            9 => Some(PieceKind::Ladder),
            _ => None,
        }
    }

    /// Catalog index (0-8), for array-backed per-kind storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// How many grid cells this kind covers.
    #[must_use]
    pub const fn footprint(self) -> u32 {
        match self {
            PieceKind::Dot => 1,
            PieceKind::Green => 2,
            PieceKind::Corner | PieceKind::Blue => 3,
            PieceKind::LShape
            | PieceKind::Purple
            | PieceKind::TShape
            | PieceKind::Red
            | PieceKind::Ladder => 4,
        }
    }

    /// True for kinds whose shape is identical under every rotation.
    #[must_use]
    pub const fn rotation_invariant(self) -> bool {
        matches!(self, PieceKind::Dot | PieceKind::Purple)
    }

    /// True for kinds with a distinct mirrored shape.
    #[must_use]
    pub const fn reflectable(self) -> bool {
        matches!(self, PieceKind::LShape | PieceKind::Ladder)
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A quarter-turn orientation, clockwise from the canonical shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rotation {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Rotation {
    /// All rotations, in enumeration order.
    pub const ALL: [Rotation; 4] = [
        Rotation::Up,
        Rotation::Right,
        Rotation::Down,
        Rotation::Left,
    ];
}

/// Per-kind piece counts, used for both the shared bank and player
/// inventories.
///
/// Backed by a fixed array indexed by catalog position, so it is `Copy`,
/// hashable (the composite memo table keys on it), and cheap to compare.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceCounts([u32; PieceKind::COUNT]);

impl PieceCounts {
    /// All counts zero.
    #[must_use]
    pub const fn new() -> Self {
        Self([0; PieceKind::COUNT])
    }

    /// Total number of pieces across all kinds.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Iterate `(kind, count)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (PieceKind, u32)> + '_ {
        PieceKind::ALL.iter().map(move |&kind| (kind, self[kind]))
    }

    /// The raw per-kind array, in catalog order.
    #[must_use]
    pub const fn as_array(&self) -> [u32; PieceKind::COUNT] {
        self.0
    }
}

impl Index<PieceKind> for PieceCounts {
    type Output = u32;

    fn index(&self, kind: PieceKind) -> &u32 {
        &self.0[kind.index()]
    }
}

impl IndexMut<PieceKind> for PieceCounts {
    fn index_mut(&mut self, kind: PieceKind) -> &mut u32 {
        &mut self.0[kind.index()]
    }
}

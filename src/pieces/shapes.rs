//! Static orientation tables: (kind, rotation, reflection) -> cell offsets.
//!
//! Offsets are `(row, column)` deltas from an anchor cell. Every orientation
//! is normalized so that `(0, 0)` is the first covered cell in row-major
//! order; row deltas are never negative, but column deltas on later rows may
//! be. With this convention every concrete placement of a shape corresponds
//! to exactly one anchor, and that anchor is always a covered cell, so
//! anchoring on empty cells enumerates every placement exactly once.
//!
//! The tables are plain consts, never mutated; `offsets` is a pure lookup.

use super::{PieceKind, Rotation};

/// A relative cell offset from the placement anchor.
pub type Offset = (i8, i8);

const DOT: [Offset; 1] = [(0, 0)];

const GREEN_V: [Offset; 2] = [(0, 0), (1, 0)];
const GREEN_H: [Offset; 2] = [(0, 0), (0, 1)];

const CORNER_UP: [Offset; 3] = [(0, 0), (1, 0), (1, 1)];
const CORNER_RIGHT: [Offset; 3] = [(0, 0), (0, 1), (1, 0)];
const CORNER_DOWN: [Offset; 3] = [(0, 0), (0, 1), (1, 1)];
const CORNER_LEFT: [Offset; 3] = [(0, 0), (1, -1), (1, 0)];

const BLUE_V: [Offset; 3] = [(0, 0), (1, 0), (2, 0)];
const BLUE_H: [Offset; 3] = [(0, 0), (0, 1), (0, 2)];

const LSHAPE_UP: [Offset; 4] = [(0, 0), (1, 0), (2, 0), (2, 1)];
const LSHAPE_RIGHT: [Offset; 4] = [(0, 0), (0, 1), (0, 2), (1, 0)];
const LSHAPE_DOWN: [Offset; 4] = [(0, 0), (0, 1), (1, 1), (2, 1)];
const LSHAPE_LEFT: [Offset; 4] = [(0, 0), (1, -2), (1, -1), (1, 0)];
const LSHAPE_R_UP: [Offset; 4] = [(0, 0), (1, 0), (2, -1), (2, 0)];
const LSHAPE_R_RIGHT: [Offset; 4] = [(0, 0), (1, 0), (1, 1), (1, 2)];
const LSHAPE_R_DOWN: [Offset; 4] = [(0, 0), (0, 1), (1, 0), (2, 0)];
const LSHAPE_R_LEFT: [Offset; 4] = [(0, 0), (0, 1), (0, 2), (1, 2)];

const PURPLE: [Offset; 4] = [(0, 0), (0, 1), (1, 0), (1, 1)];

const TSHAPE_UP: [Offset; 4] = [(0, 0), (0, 1), (0, 2), (1, 1)];
const TSHAPE_RIGHT: [Offset; 4] = [(0, 0), (1, -1), (1, 0), (2, 0)];
const TSHAPE_DOWN: [Offset; 4] = [(0, 0), (1, -1), (1, 0), (1, 1)];
const TSHAPE_LEFT: [Offset; 4] = [(0, 0), (1, 0), (1, 1), (2, 0)];

const RED_V: [Offset; 4] = [(0, 0), (1, 0), (2, 0), (3, 0)];
const RED_H: [Offset; 4] = [(0, 0), (0, 1), (0, 2), (0, 3)];

// The S-tetromino has 2-fold symmetry: Up == Down, Right == Left.
const LADDER_V: [Offset; 4] = [(0, 0), (0, 1), (1, -1), (1, 0)];
const LADDER_H: [Offset; 4] = [(0, 0), (1, 0), (1, 1), (2, 1)];
const LADDER_R_V: [Offset; 4] = [(0, 0), (0, 1), (1, 1), (1, 2)];
const LADDER_R_H: [Offset; 4] = [(0, 0), (1, -1), (1, 0), (2, -1)];

/// Cell offsets for a kind in a given orientation.
///
/// The reflection flag only changes the result for
/// [reflectable](PieceKind::reflectable) kinds; for every other kind both
/// flag values address the same shape.
#[must_use]
pub fn offsets(kind: PieceKind, rotation: Rotation, reflected: bool) -> &'static [Offset] {
    use Rotation::{Down, Left, Right, Up};

    match kind {
        PieceKind::Dot => &DOT,
        PieceKind::Green => match rotation {
            Up | Down => &GREEN_V,
            Right | Left => &GREEN_H,
        },
        PieceKind::Corner => match rotation {
            Up => &CORNER_UP,
            Right => &CORNER_RIGHT,
            Down => &CORNER_DOWN,
            Left => &CORNER_LEFT,
        },
        PieceKind::Blue => match rotation {
            Up | Down => &BLUE_V,
            Right | Left => &BLUE_H,
        },
        PieceKind::LShape => match (rotation, reflected) {
            (Up, false) => &LSHAPE_UP,
            (Right, false) => &LSHAPE_RIGHT,
            (Down, false) => &LSHAPE_DOWN,
            (Left, false) => &LSHAPE_LEFT,
            (Up, true) => &LSHAPE_R_UP,
            (Right, true) => &LSHAPE_R_RIGHT,
            (Down, true) => &LSHAPE_R_DOWN,
            (Left, true) => &LSHAPE_R_LEFT,
        },
        PieceKind::Purple => &PURPLE,
        PieceKind::TShape => match rotation {
            Up => &TSHAPE_UP,
            Right => &TSHAPE_RIGHT,
            Down => &TSHAPE_DOWN,
            Left => &TSHAPE_LEFT,
        },
        PieceKind::Red => match rotation {
            Up | Down => &RED_V,
            Right | Left => &RED_H,
        },
        PieceKind::Ladder => match (rotation, reflected) {
            (Up | Down, false) => &LADDER_V,
            (Right | Left, false) => &LADDER_H,
            (Up | Down, true) => &LADDER_R_V,
            (Right | Left, true) => &LADDER_R_H,
        },
    }
}

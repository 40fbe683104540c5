//! The static puzzle template sets for the black and white decks.
//!
//! Templates only ever contain border and empty cells; placed pieces appear
//! once a template has been instantiated into a game. Black-deck puzzles are
//! the high-value endgame puzzles; emptying the black draw pile triggers the
//! final round countdown.

use super::{Cell, Puzzle, GRID_SIZE};
use crate::pieces::PieceKind;

fn template(grid: [[u8; GRID_SIZE]; GRID_SIZE], points: i32, reward: PieceKind) -> Puzzle {
    let mut cells = [[Cell::Border; GRID_SIZE]; GRID_SIZE];
    for (x, row) in grid.iter().enumerate() {
        for (y, &value) in row.iter().enumerate() {
            cells[x][y] = match value {
                0 => Cell::Empty,
                _ => Cell::Border,
            };
        }
    }
    Puzzle {
        grid: cells,
        points,
        reward,
    }
}

/// The white-deck templates, in canonical order (shuffled at game creation).
#[must_use]
pub fn white_templates() -> Vec<Puzzle> {
    vec![
        template(
            [
                [1, 1, 1, 1, 1],
                [1, 0, 0, 1, 1],
                [1, 0, 0, 1, 1],
                [1, 0, 0, 0, 1],
                [1, 1, 1, 1, 1],
            ],
            2,
            PieceKind::Blue,
        ),
        template(
            [
                [1, 1, 1, 1, 1],
                [1, 0, 1, 1, 1],
                [1, 0, 0, 0, 1],
                [1, 0, 0, 0, 1],
                [1, 1, 0, 0, 1],
            ],
            2,
            PieceKind::Purple,
        ),
        template(
            [
                [1, 1, 1, 1, 1],
                [1, 1, 1, 1, 1],
                [0, 0, 0, 0, 1],
                [1, 0, 0, 0, 0],
                [1, 1, 1, 1, 1],
            ],
            2,
            PieceKind::Red,
        ),
        template(
            [
                [1, 1, 1, 1, 1],
                [1, 0, 0, 1, 1],
                [1, 0, 0, 1, 1],
                [1, 0, 0, 0, 1],
                [1, 0, 0, 0, 1],
            ],
            3,
            PieceKind::LShape,
        ),
        template(
            [
                [1, 1, 1, 1, 1],
                [1, 0, 1, 1, 1],
                [1, 0, 0, 1, 1],
                [1, 0, 0, 0, 1],
                [1, 0, 0, 0, 1],
            ],
            3,
            PieceKind::Blue,
        ),
        template(
            [
                [1, 1, 1, 1, 1],
                [1, 1, 1, 1, 1],
                [1, 0, 0, 0, 1],
                [1, 1, 0, 1, 1],
                [1, 1, 1, 1, 1],
            ],
            1,
            PieceKind::Green,
        ),
        template(
            [
                [1, 1, 1, 1, 1],
                [1, 0, 1, 1, 1],
                [1, 0, 1, 1, 1],
                [1, 0, 0, 1, 1],
                [1, 1, 1, 1, 1],
            ],
            0,
            PieceKind::LShape,
        ),
    ]
}

/// The black-deck templates, in canonical order (shuffled at game creation).
#[must_use]
pub fn black_templates() -> Vec<Puzzle> {
    vec![
        template(
            [
                [1, 1, 0, 1, 1],
                [1, 1, 0, 0, 1],
                [1, 0, 0, 0, 1],
                [1, 0, 0, 0, 1],
                [1, 0, 0, 0, 1],
            ],
            4,
            PieceKind::Dot,
        ),
        template(
            [
                [1, 1, 1, 1, 1],
                [1, 1, 1, 0, 1],
                [1, 1, 0, 0, 1],
                [0, 0, 0, 0, 1],
                [0, 0, 0, 0, 0],
            ],
            4,
            PieceKind::Green,
        ),
        template(
            [
                [1, 1, 0, 1, 1],
                [1, 0, 0, 1, 1],
                [1, 0, 0, 1, 1],
                [1, 0, 0, 0, 1],
                [0, 0, 0, 0, 0],
            ],
            4,
            PieceKind::Corner,
        ),
        template(
            [
                [1, 1, 1, 1, 1],
                [1, 1, 1, 0, 0],
                [1, 1, 0, 0, 0],
                [1, 0, 0, 0, 0],
                [0, 0, 0, 0, 0],
            ],
            4,
            PieceKind::Blue,
        ),
        template(
            [
                [1, 1, 1, 1, 1],
                [0, 0, 0, 0, 1],
                [1, 0, 0, 0, 0],
                [1, 0, 0, 0, 0],
                [0, 0, 0, 0, 1],
            ],
            5,
            PieceKind::Dot,
        ),
    ]
}

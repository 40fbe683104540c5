//! # projectl
//!
//! A rules engine for the Project L board game: piece placement into 5x5
//! puzzle grids, a shared piece bank, two puzzle decks, and an end-of-game
//! countdown, for 2-4 players.
//!
//! ## Design Principles
//!
//! 1. **Single mutation path**: [`GameState::step`] is the only way a state
//!    changes. It validates completely before mutating, so a rejected action
//!    leaves the state untouched.
//!
//! 2. **Enumeration by speculation**: the [`Enumerator`] clones the state
//!    per candidate and keeps what the resolver accepts. Rule knowledge
//!    lives in one place.
//!
//! 3. **Cheap clones**: decks are persistent vectors (`im`), boards are
//!    small arrays, so the speculative clones MCTS-style consumers make are
//!    inexpensive.
//!
//! ## Modules
//!
//! - `pieces`: the nine-kind piece catalog and orientation tables
//! - `puzzles`: grids, cells, and the twelve puzzle templates
//! - `core`: players, actions, game state, RNG
//! - `rules`: the action resolver and its error type
//! - `enumerate`: legal-action enumeration with memo tables
//! - `protocol`: visible snapshots and the wire format

pub mod core;
pub mod enumerate;
pub mod pieces;
pub mod protocol;
pub mod puzzles;
pub mod rules;

pub use crate::core::{
    Action, GameRng, GameState, Placement, PlayerBoard, PlayerId, PlayerMap, PuzzleSupply,
    ACTIONS_PER_TURN, FINAL_ROUNDS, MAX_PLAYER_PUZZLES, PIECES_PER_KIND, SLOT_COUNT,
};

pub use crate::enumerate::Enumerator;
pub use crate::pieces::{PieceCounts, PieceKind, Rotation};
pub use crate::protocol::{VisibleState, WirePuzzle, WireSnapshot};
pub use crate::puzzles::{Cell, GridKey, Puzzle, GRID_SIZE};
pub use crate::rules::InvalidAction;

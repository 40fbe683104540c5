//! Core engine types: players, state, actions, RNG.
//!
//! This module contains the authoritative game data. Rules live in
//! [`rules`](crate::rules), legal-move generation in
//! [`enumerate`](crate::enumerate).

pub mod action;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, Placement};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{
    GameState, PlayerBoard, PuzzleSupply, ACTIONS_PER_TURN, FINAL_ROUNDS, MAX_PLAYER_PUZZLES,
    PIECES_PER_KIND, SLOTS_PER_DECK, SLOT_COUNT,
};

//! Visible snapshots and the wire format for remote viewers.
//!
//! ## VisibleState
//!
//! A plain serializable record of everything a player can see: face-up
//! slots, deck counts, the bank, per-player inventories/points/puzzles, and
//! the turn counters. [`GameState::snapshot`] captures one; the enumerator
//! returns one per candidate action.
//!
//! ## WireSnapshot
//!
//! One textual message per ply for remote viewers. The typed in-memory
//! structures (per-player inventories keyed by `(player, kind)`) flatten
//! into nested integer-keyed maps so any serialization format can carry
//! them; B-tree maps keep key order stable across encodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::state::SLOTS_PER_DECK;
use crate::core::{GameState, PlayerId};
use crate::pieces::PieceCounts;
use crate::puzzles::{Puzzle, GRID_SIZE};

/// Everything observable about a game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleState {
    pub black_slots: [Option<Puzzle>; SLOTS_PER_DECK],
    pub white_slots: [Option<Puzzle>; SLOTS_PER_DECK],
    pub black_deck_remaining: usize,
    pub white_deck_remaining: usize,
    /// Unowned pieces in the shared bank.
    pub bank: PieceCounts,
    /// Per-player inventories, indexed by player.
    pub player_pieces: Vec<PieceCounts>,
    pub player_points: Vec<i32>,
    pub player_puzzles: Vec<Vec<Puzzle>>,
    pub current_player: PlayerId,
    pub remaining_actions: u32,
    pub master_used: bool,
    pub remaining_rounds: Option<i8>,
    pub points_to_pay: i32,
}

impl VisibleState {
    /// Capture a snapshot of the given state.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        Self {
            black_slots: state.supply.black_slots.clone(),
            white_slots: state.supply.white_slots.clone(),
            black_deck_remaining: state.supply.black_deck.len(),
            white_deck_remaining: state.supply.white_deck.len(),
            bank: state.bank,
            player_pieces: state.players.iter().map(|(_, b)| b.pieces).collect(),
            player_points: state.players.iter().map(|(_, b)| b.points).collect(),
            player_puzzles: state
                .players
                .iter()
                .map(|(_, b)| b.puzzles.clone())
                .collect(),
            current_player: state.current_player,
            remaining_actions: state.remaining_actions,
            master_used: state.master_used,
            remaining_rounds: state.remaining_rounds,
            points_to_pay: state.points_to_pay,
        }
    }

    /// Report a face-up slot (0-7) as absent.
    ///
    /// Used by the enumerator's endgame masking; see
    /// [`enumerate`](crate::enumerate).
    pub(crate) fn mask_slot(&mut self, slot: u8) {
        let i = slot as usize;
        if i < SLOTS_PER_DECK {
            self.black_slots[i] = None;
        } else {
            self.white_slots[i - SLOTS_PER_DECK] = None;
        }
    }

    /// Flatten into the portable wire form.
    #[must_use]
    pub fn to_wire(&self) -> WireSnapshot {
        let players = || (0..self.player_pieces.len() as u8);
        WireSnapshot {
            black_puzzles: self
                .black_slots
                .iter()
                .map(|s| s.as_ref().map(WirePuzzle::from))
                .collect(),
            white_puzzles: self
                .white_slots
                .iter()
                .map(|s| s.as_ref().map(WirePuzzle::from))
                .collect(),
            black_puzzles_remaining: self.black_deck_remaining,
            white_puzzles_remaining: self.white_deck_remaining,
            piece_quantity: self.bank.iter().map(|(k, n)| (k.id(), n)).collect(),
            players_pieces: players()
                .map(|p| {
                    let counts = &self.player_pieces[p as usize];
                    (p, counts.iter().map(|(k, n)| (k.id(), n)).collect())
                })
                .collect(),
            players_points: players()
                .map(|p| (p, self.player_points[p as usize]))
                .collect(),
            players_puzzles: players()
                .map(|p| {
                    let puzzles = &self.player_puzzles[p as usize];
                    (p, puzzles.iter().map(WirePuzzle::from).collect())
                })
                .collect(),
            current_player: self.current_player.0,
            remaining_actions: self.remaining_actions,
            did_master_action: self.master_used,
            remaining_rounds: self.remaining_rounds,
            points_to_pay: self.points_to_pay,
        }
    }
}

impl GameState {
    /// Capture the serializable visible record of this state.
    #[must_use]
    pub fn snapshot(&self) -> VisibleState {
        VisibleState::capture(self)
    }
}

/// A puzzle as sent over the wire: integer grid plus metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePuzzle {
    /// Cell values per [`Cell::wire_value`](crate::puzzles::Cell::wire_value).
    pub matrix: [[u8; GRID_SIZE]; GRID_SIZE],
    pub points: i32,
    pub reward: u8,
}

impl From<&Puzzle> for WirePuzzle {
    fn from(puzzle: &Puzzle) -> Self {
        let mut matrix = [[0u8; GRID_SIZE]; GRID_SIZE];
        for (x, row) in puzzle.grid.iter().enumerate() {
            for (y, cell) in row.iter().enumerate() {
                matrix[x][y] = cell.wire_value();
            }
        }
        Self {
            matrix,
            points: puzzle.points,
            reward: puzzle.reward.id(),
        }
    }
}

/// One snapshot message for a remote viewer.
///
/// All composite keys are flattened into nested maps of plain integers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireSnapshot {
    pub black_puzzles: Vec<Option<WirePuzzle>>,
    pub white_puzzles: Vec<Option<WirePuzzle>>,
    pub black_puzzles_remaining: usize,
    pub white_puzzles_remaining: usize,
    /// Bank counts: piece id -> count.
    pub piece_quantity: BTreeMap<u8, u32>,
    /// Player -> piece id -> count.
    pub players_pieces: BTreeMap<u8, BTreeMap<u8, u32>>,
    pub players_points: BTreeMap<u8, i32>,
    pub players_puzzles: BTreeMap<u8, Vec<WirePuzzle>>,
    pub current_player: u8,
    pub remaining_actions: u32,
    pub did_master_action: bool,
    pub remaining_rounds: Option<i8>,
    pub points_to_pay: i32,
}

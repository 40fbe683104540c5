//! Game state: the mutable aggregate of decks, slots, players, and turn
//! counters.
//!
//! ## GameState
//!
//! The single owner of all mutable game data. It is created by
//! [`GameState::new`] (which shuffles both decks and then discards the RNG,
//! so a state is plain comparable data), mutated only through
//! [`step`](crate::core::GameState::step), and deep-cloned by the enumerator
//! for speculative evaluation.
//!
//! The two draw piles use `im::Vector`, so the per-candidate clones the
//! enumerator makes share deck structure instead of copying it.

use im::Vector;

use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::pieces::{PieceCounts, PieceKind};
use crate::puzzles::templates::{black_templates, white_templates};
use crate::puzzles::{Cell, Puzzle};

/// Actions granted at the start of every turn.
pub const ACTIONS_PER_TURN: u32 = 3;

/// Maximum puzzles a player may hold at once.
pub const MAX_PLAYER_PUZZLES: usize = 4;

/// Face-up slots per deck color.
pub const SLOTS_PER_DECK: usize = 4;

/// Total face-up slots (0-3 black, 4-7 white).
pub const SLOT_COUNT: u8 = (2 * SLOTS_PER_DECK) as u8;

/// Fixed per-kind piece total for the life of a game.
pub const PIECES_PER_KIND: u32 = 15;

/// Rounds remaining once the black deck empties.
pub const FINAL_ROUNDS: i8 = 2;

/// One player's holdings: inventory, score, owned puzzles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerBoard {
    /// Owned piece counts per kind.
    pub pieces: PieceCounts,
    /// Accumulated points. Can go negative from the final-phase penalty.
    pub points: i32,
    /// Owned puzzle instances, at most [`MAX_PLAYER_PUZZLES`], in take order.
    pub puzzles: Vec<Puzzle>,
}

impl PlayerBoard {
    fn starting() -> Self {
        let mut pieces = PieceCounts::new();
        pieces[PieceKind::Dot] = 1;
        pieces[PieceKind::Green] = 1;
        Self {
            pieces,
            points: 0,
            puzzles: Vec::new(),
        }
    }
}

/// The shared puzzle supply: two decks, four face-up slots each.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleSupply {
    pub black_slots: [Option<Puzzle>; SLOTS_PER_DECK],
    pub white_slots: [Option<Puzzle>; SLOTS_PER_DECK],
    pub black_deck: Vector<Puzzle>,
    pub white_deck: Vector<Puzzle>,
}

impl PuzzleSupply {
    fn deal(rng: &mut GameRng) -> Self {
        let mut black = black_templates();
        rng.shuffle(&mut black);
        let mut white = white_templates();
        rng.shuffle(&mut white);

        let mut black_iter = black.into_iter();
        let black_slots = std::array::from_fn(|_| black_iter.next());
        let black_deck: Vector<Puzzle> = black_iter.collect();

        let mut white_iter = white.into_iter();
        let white_slots = std::array::from_fn(|_| white_iter.next());
        let white_deck: Vector<Puzzle> = white_iter.collect();

        Self {
            black_slots,
            white_slots,
            black_deck,
            white_deck,
        }
    }

    /// The face-up slot at index 0-7, black first.
    #[must_use]
    pub fn slot(&self, slot: u8) -> Option<&Puzzle> {
        let i = slot as usize;
        if i < SLOTS_PER_DECK {
            self.black_slots[i].as_ref()
        } else {
            self.white_slots[i - SLOTS_PER_DECK].as_ref()
        }
    }

    /// Empty out a slot, returning the puzzle that was there.
    pub(crate) fn clear_slot(&mut self, slot: u8) -> Option<Puzzle> {
        let i = slot as usize;
        if i < SLOTS_PER_DECK {
            self.black_slots[i].take()
        } else {
            self.white_slots[i - SLOTS_PER_DECK].take()
        }
    }

    /// Refill every empty slot from the tail of its deck.
    pub(crate) fn refill(&mut self) {
        for slot in self.black_slots.iter_mut() {
            if slot.is_none() {
                *slot = self.black_deck.pop_back();
            }
        }
        for slot in self.white_slots.iter_mut() {
            if slot.is_none() {
                *slot = self.white_deck.pop_back();
            }
        }
    }
}

/// The authoritative game state.
///
/// All fields are public for inspection; mutation goes through
/// [`step`](GameState::step) only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    player_count: usize,

    /// Shared, unowned piece supply.
    pub bank: PieceCounts,

    /// Decks and face-up slots.
    pub supply: PuzzleSupply,

    /// Per-player holdings.
    pub players: PlayerMap<PlayerBoard>,

    /// Whose turn it is.
    pub current_player: PlayerId,

    /// Actions left this turn, reset to [`ACTIONS_PER_TURN`] on advance.
    pub remaining_actions: u32,

    /// Whether the master action has been used this turn.
    pub master_used: bool,

    /// `None` while the black deck is non-empty; then counts down from
    /// [`FINAL_ROUNDS`] on each wrap to player 0. `-1` is terminal.
    pub remaining_rounds: Option<i8>,

    /// Final-phase penalty accumulator, paid out by Stop.
    pub points_to_pay: i32,
}

impl GameState {
    /// Create a fresh game for 2-4 players.
    ///
    /// Shuffles both decks with a seeded [`GameRng`]; the same seed and
    /// player count always produce the same initial state.
    #[must_use]
    pub fn new(player_count: usize, seed: u64) -> Self {
        assert!(
            (2..=4).contains(&player_count),
            "Project L supports 2-4 players"
        );

        let mut rng = GameRng::new(seed);

        let mut bank = PieceCounts::new();
        for kind in PieceKind::ALL {
            // Each player starts with one Dot and one Green, drawn from the
            // same fixed 15-per-kind total.
            bank[kind] = if matches!(kind, PieceKind::Dot | PieceKind::Green) {
                PIECES_PER_KIND - player_count as u32
            } else {
                PIECES_PER_KIND
            };
        }

        Self {
            player_count,
            bank,
            supply: PuzzleSupply::deal(&mut rng),
            players: PlayerMap::new(player_count, |_| PlayerBoard::starting()),
            current_player: PlayerId::new(0),
            remaining_actions: ACTIONS_PER_TURN,
            master_used: false,
            remaining_rounds: None,
            points_to_pay: 0,
        }
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// The acting player's board.
    #[must_use]
    pub fn current_board(&self) -> &PlayerBoard {
        &self.players[self.current_player]
    }

    pub(crate) fn current_board_mut(&mut self) -> &mut PlayerBoard {
        let player = self.current_player;
        &mut self.players[player]
    }

    /// True once the round countdown has run out; `step` is a no-op.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.remaining_rounds == Some(-1)
    }

    /// True during the final phase (only Place-piece and Stop accepted).
    #[must_use]
    pub fn in_final_phase(&self) -> bool {
        self.remaining_rounds == Some(0)
    }

    /// Total pieces of a kind across bank, inventories, and placed cells.
    ///
    /// Placed cells are converted to whole pieces via the kind's footprint.
    /// For every reachable state this equals [`PIECES_PER_KIND`]; the
    /// conservation tests lean on it.
    #[must_use]
    pub fn piece_total(&self, kind: PieceKind) -> u32 {
        let mut total = self.bank[kind];
        let mut placed_cells = 0u32;
        for (_, board) in self.players.iter() {
            total += board.pieces[kind];
            for puzzle in &board.puzzles {
                placed_cells += puzzle
                    .grid
                    .iter()
                    .flatten()
                    .filter(|&&c| c == Cell::Piece(kind))
                    .count() as u32;
            }
        }
        debug_assert_eq!(placed_cells % kind.footprint(), 0);
        total + placed_cells / kind.footprint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_setup() {
        let state = GameState::new(2, 42);

        assert_eq!(state.player_count(), 2);
        assert_eq!(state.current_player, PlayerId::new(0));
        assert_eq!(state.remaining_actions, ACTIONS_PER_TURN);
        assert!(!state.master_used);
        assert_eq!(state.remaining_rounds, None);
        assert_eq!(state.points_to_pay, 0);

        // 4 face-up slots per color, remainder in the decks.
        assert!(state.supply.black_slots.iter().all(|s| s.is_some()));
        assert!(state.supply.white_slots.iter().all(|s| s.is_some()));
        assert_eq!(state.supply.black_deck.len(), 1);
        assert_eq!(state.supply.white_deck.len(), 3);
    }

    #[test]
    fn test_starting_resources() {
        let state = GameState::new(3, 0);

        assert_eq!(state.bank[PieceKind::Dot], PIECES_PER_KIND - 3);
        assert_eq!(state.bank[PieceKind::Green], PIECES_PER_KIND - 3);
        assert_eq!(state.bank[PieceKind::Red], PIECES_PER_KIND);

        for (_, board) in state.players.iter() {
            assert_eq!(board.pieces[PieceKind::Dot], 1);
            assert_eq!(board.pieces[PieceKind::Green], 1);
            assert_eq!(board.pieces.total(), 2);
            assert_eq!(board.points, 0);
            assert!(board.puzzles.is_empty());
        }
    }

    #[test]
    fn test_conservation_at_reset() {
        for player_count in 2..=4 {
            let state = GameState::new(player_count, 99);
            for kind in PieceKind::ALL {
                assert_eq!(state.piece_total(kind), PIECES_PER_KIND);
            }
        }
    }

    #[test]
    fn test_same_seed_same_state() {
        let a = GameState::new(2, 1234);
        let b = GameState::new(2, 1234);
        assert_eq!(a, b);

        let c = GameState::new(2, 1235);
        assert_ne!(a, c);
    }

    #[test]
    fn test_slot_addressing() {
        let state = GameState::new(2, 42);
        for slot in 0..SLOT_COUNT {
            assert!(state.supply.slot(slot).is_some());
        }
        let black0 = state.supply.slot(0).unwrap();
        assert_eq!(Some(black0), state.supply.black_slots[0].as_ref());
        let white0 = state.supply.slot(4).unwrap();
        assert_eq!(Some(white0), state.supply.white_slots[0].as_ref());
    }

    #[test]
    fn test_refill_draws_from_deck_tail() {
        let mut state = GameState::new(2, 42);
        let tail = state.supply.black_deck.back().copied().unwrap();

        state.supply.clear_slot(2);
        state.supply.refill();

        assert_eq!(state.supply.black_slots[2], Some(tail));
        assert!(state.supply.black_deck.is_empty());
    }

    #[test]
    #[should_panic(expected = "2-4 players")]
    fn test_rejects_bad_player_count() {
        let _ = GameState::new(5, 42);
    }
}

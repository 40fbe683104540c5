//! Legal action enumeration.
//!
//! ## Approach
//!
//! The enumerator generates candidate actions in a fixed deterministic
//! order, speculatively applies each to a clone of the state, and keeps the
//! ones the resolver accepts. Every reported pair is therefore an action
//! [`step`](crate::core::GameState::step) is guaranteed to accept, together
//! with the exact snapshot that action produces. Rule knowledge lives in the
//! resolver alone; the enumerator only has to over-generate.
//!
//! ## Candidate order
//!
//! Draw, take (slots 0-7), upgrade (owned sources x catalog targets),
//! place (catalog kinds x puzzles x cached spots), master candidates, stop.
//!
//! ## Endgame slot masking
//!
//! During the last round (one round left before the countdown expires),
//! slots that were empty before the action, and the slot a take-puzzle
//! candidate takes, are reported as empty even if the post-action refill
//! repopulated them. A puzzle surfacing that late can never be interacted
//! with, so callers should not plan around it.

use tracing::debug;

use crate::core::state::SLOT_COUNT;
use crate::core::{Action, GameState, Placement};
use crate::pieces::PieceKind;
use crate::protocol::VisibleState;

pub mod cache;

pub use cache::{Composite, CompositeCache, PlacementCache, Spot};

/// Stateful legal-action enumerator.
///
/// Carries the two memo tables across calls; a fresh enumerator returns the
/// same actions and snapshots as a warm one, only slower.
#[derive(Debug, Default)]
pub struct Enumerator {
    spots: PlacementCache,
    composites: CompositeCache,
}

impl Enumerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every action the current player may legally take, with the snapshot
    /// each one would produce. Empty on a terminal state.
    pub fn enumerate(&mut self, state: &GameState) -> Vec<(Action, VisibleState)> {
        if state.is_terminal() {
            return Vec::new();
        }

        let last_round = state.remaining_rounds == Some(1);
        let empty_slots: Vec<u8> = (0..SLOT_COUNT)
            .filter(|&slot| state.supply.slot(slot).is_none())
            .collect();

        let mut out = Vec::new();

        try_candidate(state, Action::DrawBasic, last_round, &empty_slots, &mut out);

        for slot in 0..SLOT_COUNT {
            try_candidate(
                state,
                Action::TakePuzzle { slot },
                last_round,
                &empty_slots,
                &mut out,
            );
        }

        let board = state.current_board();
        for from in PieceKind::ALL {
            if board.pieces[from] == 0 {
                continue;
            }
            for to in PieceKind::ALL {
                try_candidate(
                    state,
                    Action::UpgradePiece { from, to },
                    last_round,
                    &empty_slots,
                    &mut out,
                );
            }
        }

        for kind in PieceKind::ALL {
            if board.pieces[kind] == 0 {
                continue;
            }
            for (index, puzzle) in board.puzzles.iter().enumerate() {
                let spots = self.spots.spots(kind, puzzle).to_vec();
                for (x, y, rotation, reflected) in spots {
                    let action = Action::PlacePiece(Placement {
                        puzzle: index,
                        piece: kind,
                        x,
                        y,
                        rotation,
                        reflected,
                    });
                    try_candidate(state, action, last_round, &empty_slots, &mut out);
                }
            }
        }

        if !state.master_used
            && !board.puzzles.is_empty()
            && board.pieces.total() >= board.puzzles.len() as u32
        {
            let composites = self
                .composites
                .composites(&board.pieces, &board.puzzles, &mut self.spots)
                .to_vec();
            for placements in composites {
                try_candidate(
                    state,
                    Action::Master { placements },
                    last_round,
                    &empty_slots,
                    &mut out,
                );
            }
        }

        try_candidate(state, Action::Stop, last_round, &empty_slots, &mut out);

        debug!(
            player = %state.current_player,
            candidates = out.len(),
            "enumerated legal actions"
        );
        out
    }
}

/// Apply one candidate to a scratch clone; keep it if the resolver accepts.
fn try_candidate(
    state: &GameState,
    action: Action,
    last_round: bool,
    empty_slots: &[u8],
    out: &mut Vec<(Action, VisibleState)>,
) {
    let mut scratch = state.clone();
    if let Ok((mut snapshot, _)) = scratch.step(&action) {
        if last_round {
            for &slot in empty_slots {
                snapshot.mask_slot(slot);
            }
            if let Action::TakePuzzle { slot } = action {
                snapshot.mask_slot(slot);
            }
        }
        out.push((action, snapshot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use im::Vector;

    use crate::core::PlayerId;
    use crate::puzzles::templates::white_templates;
    use crate::puzzles::Cell;

    #[test]
    fn test_terminal_state_yields_nothing() {
        let mut state = GameState::new(2, 42);
        state.remaining_rounds = Some(-1);

        let mut enumerator = Enumerator::new();
        assert!(enumerator.enumerate(&state).is_empty());
    }

    #[test]
    fn test_fresh_game_candidates_in_order() {
        let state = GameState::new(2, 42);
        let mut enumerator = Enumerator::new();

        let actions: Vec<Action> = enumerator
            .enumerate(&state)
            .into_iter()
            .map(|(action, _)| action)
            .collect();

        // Draw, all eight slots, then the three legal upgrades of the
        // starting inventory. No puzzles yet, so no placements or masters,
        // and stop is out of phase.
        let mut expected = vec![Action::DrawBasic];
        for slot in 0..SLOT_COUNT {
            expected.push(Action::TakePuzzle { slot });
        }
        expected.push(Action::UpgradePiece {
            from: PieceKind::Dot,
            to: PieceKind::Green,
        });
        expected.push(Action::UpgradePiece {
            from: PieceKind::Green,
            to: PieceKind::Corner,
        });
        expected.push(Action::UpgradePiece {
            from: PieceKind::Green,
            to: PieceKind::Blue,
        });

        assert_eq!(actions, expected);
    }

    #[test]
    fn test_reported_snapshots_match_step() {
        let state = GameState::new(2, 42);
        let mut enumerator = Enumerator::new();

        for (action, snapshot) in enumerator.enumerate(&state) {
            let mut replay = state.clone();
            let (expected, _) = replay.step(&action).unwrap();
            assert_eq!(snapshot, expected, "snapshot mismatch for {action}");
        }
    }

    #[test]
    fn test_place_candidates_scan_anchors_row_major() {
        let mut state = GameState::new(2, 42);
        let puzzle = white_templates()[0].clone();
        let board = &mut state.players[PlayerId::new(0)];
        board.puzzles.push(puzzle.clone());
        board.pieces[PieceKind::Green] = 0;

        let mut enumerator = Enumerator::new();
        let anchors: Vec<(u8, u8)> = enumerator
            .enumerate(&state)
            .into_iter()
            .filter_map(|(action, _)| match action {
                Action::PlacePiece(p) if p.piece == PieceKind::Dot => Some((p.x, p.y)),
                _ => None,
            })
            .collect();

        let expected: Vec<(u8, u8)> = (0..5)
            .flat_map(|x| (0..5).map(move |y| (x, y)))
            .filter(|&(x, y)| puzzle.grid[x as usize][y as usize] == Cell::Empty)
            .map(|(x, y)| (x as u8, y as u8))
            .collect();

        assert_eq!(anchors, expected);
    }

    #[test]
    fn test_master_candidates_cover_every_puzzle() {
        let mut state = GameState::new(2, 42);
        let board = &mut state.players[PlayerId::new(0)];
        board.puzzles.push(white_templates()[0].clone());
        board.puzzles.push(white_templates()[3].clone());

        let mut enumerator = Enumerator::new();
        let masters: Vec<Composite> = enumerator
            .enumerate(&state)
            .into_iter()
            .filter_map(|(action, _)| match action {
                Action::Master { placements } => Some(placements),
                _ => None,
            })
            .collect();

        assert!(!masters.is_empty());
        for placements in &masters {
            assert_eq!(placements.len(), 2);
            assert_eq!(placements[0].puzzle, 0);
            assert_eq!(placements[1].puzzle, 1);
        }
    }

    #[test]
    fn test_no_master_candidates_after_use() {
        let mut state = GameState::new(2, 42);
        let board = &mut state.players[PlayerId::new(0)];
        board.puzzles.push(white_templates()[0].clone());
        state.master_used = true;

        let mut enumerator = Enumerator::new();
        let has_master = enumerator
            .enumerate(&state)
            .iter()
            .any(|(action, _)| matches!(action, Action::Master { .. }));
        assert!(!has_master);
    }

    #[test]
    fn test_final_phase_offers_only_placements_and_stop() {
        let mut state = GameState::new(2, 42);
        state.remaining_rounds = Some(0);
        state.players[PlayerId::new(0)]
            .puzzles
            .push(white_templates()[0].clone());

        let mut enumerator = Enumerator::new();
        let candidates = enumerator.enumerate(&state);

        assert!(!candidates.is_empty());
        for (action, _) in &candidates {
            assert!(matches!(action, Action::PlacePiece(_) | Action::Stop));
        }
        assert_eq!(candidates.last().unwrap().0, Action::Stop);
    }

    #[test]
    fn test_warm_cache_matches_fresh_enumerator() {
        let mut state = GameState::new(2, 42);
        let board = &mut state.players[PlayerId::new(0)];
        board.puzzles.push(white_templates()[0].clone());
        board.puzzles.push(white_templates()[3].clone());
        board.pieces[PieceKind::Blue] = 1;

        let mut warm = Enumerator::new();
        let first = warm.enumerate(&state);
        let second = warm.enumerate(&state);
        assert_eq!(first, second);

        let mut fresh = Enumerator::new();
        assert_eq!(fresh.enumerate(&state), first);
        assert!(!warm.spots.is_empty());
    }

    #[test]
    fn test_last_round_masks_refilled_slots() {
        let mut state = GameState::new(2, 42);
        state.supply.black_deck = Vector::new();
        state.remaining_rounds = Some(1);
        state.remaining_actions = 1;
        // Slot 5 is empty going into the action; the turn-advance refill
        // would repopulate it from the white deck.
        state.supply.clear_slot(5);
        assert!(!state.supply.white_deck.is_empty());

        let mut replay = state.clone();
        let (unmasked, _) = replay.step(&Action::DrawBasic).unwrap();
        assert!(unmasked.white_slots[1].is_some());

        let mut enumerator = Enumerator::new();
        let candidates = enumerator.enumerate(&state);
        let (_, snapshot) = candidates
            .iter()
            .find(|(action, _)| *action == Action::DrawBasic)
            .unwrap();
        assert!(snapshot.white_slots[1].is_none());
    }

    #[test]
    fn test_taken_slot_masked_in_last_round() {
        let mut state = GameState::new(2, 42);
        state.supply.black_deck = Vector::new();
        state.remaining_rounds = Some(1);
        state.remaining_actions = 1;

        let mut enumerator = Enumerator::new();
        let candidates = enumerator.enumerate(&state);
        let (_, snapshot) = candidates
            .iter()
            .find(|(action, _)| *action == Action::TakePuzzle { slot: 6 })
            .unwrap();
        assert!(snapshot.white_slots[2].is_none());
    }
}

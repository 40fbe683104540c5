//! The action resolver: validates and applies one action per call.
//!
//! ## Contract
//!
//! [`GameState::step`] either applies the action *and* all end-of-action
//! bookkeeping (puzzle completion, turn advance, slot refill, round
//! countdown), or returns [`InvalidAction`] with the state untouched. Every
//! handler validates completely before its first mutation; the master action
//! validates against a scratch copy of the player's boards so that a failing
//! constituent placement, including one that only conflicts with an earlier
//! placement in the same action, aborts with zero mutation.
//!
//! A completed puzzle whose placed-cell count is not divisible by the
//! owning kind's footprint indicates model corruption and panics.

use tracing::trace;

use crate::core::state::{ACTIONS_PER_TURN, FINAL_ROUNDS, MAX_PLAYER_PUZZLES, SLOT_COUNT};
use crate::core::{Action, GameState, Placement, PlayerId};
use crate::pieces::{PieceCounts, PieceKind};
use crate::protocol::VisibleState;
use crate::rules::InvalidAction;

impl GameState {
    /// Validate and apply one action for the current player.
    ///
    /// Returns the post-action snapshot and whether the game continues.
    /// On a terminal state this is a no-op returning `continues = false`.
    pub fn step(&mut self, action: &Action) -> Result<(VisibleState, bool), InvalidAction> {
        if self.is_terminal() {
            return Ok((self.snapshot(), false));
        }

        if self.in_final_phase() {
            match action {
                Action::PlacePiece(placement) => {
                    self.place_piece(placement)?;
                    self.points_to_pay += 1;
                }
                Action::Stop => {
                    let penalty = self.points_to_pay;
                    self.current_board_mut().points -= penalty;
                    self.points_to_pay = 0;
                    self.remaining_actions = 0;
                }
                _ => return Err(InvalidAction::FinalPhaseRestriction),
            }
        } else {
            match action {
                Action::DrawBasic => self.draw_basic()?,
                Action::UpgradePiece { from, to } => self.upgrade_piece(*from, *to)?,
                Action::TakePuzzle { slot } => self.take_puzzle(*slot)?,
                Action::PlacePiece(placement) => self.place_piece(placement)?,
                Action::Master { placements } => self.master_action(placements)?,
                Action::Stop => return Err(InvalidAction::StopOutsideFinalPhase),
            }
            self.remaining_actions -= 1;
        }

        trace!(player = %self.current_player, %action, "action applied");

        self.settle_completed_puzzles();

        let mut wrapped = false;
        if self.remaining_actions == 0 {
            self.remaining_actions = ACTIONS_PER_TURN;
            self.master_used = false;
            self.current_player = self.current_player.next(self.player_count());
            wrapped = self.current_player == PlayerId::new(0);
            self.supply.refill();
        }

        // End-game countdown: armed when the black deck empties, ticked
        // down only when play wraps back to player 0.
        if self.supply.black_deck.is_empty() {
            match self.remaining_rounds {
                None => self.remaining_rounds = Some(FINAL_ROUNDS),
                Some(rounds) if wrapped => self.remaining_rounds = Some(rounds - 1),
                _ => {}
            }
        }

        Ok((self.snapshot(), !self.is_terminal()))
    }

    fn draw_basic(&mut self) -> Result<(), InvalidAction> {
        if self.bank[PieceKind::Dot] == 0 {
            return Err(InvalidAction::NoBasicPiecesLeft);
        }
        self.bank[PieceKind::Dot] -= 1;
        self.current_board_mut().pieces[PieceKind::Dot] += 1;
        Ok(())
    }

    fn upgrade_piece(&mut self, from: PieceKind, to: PieceKind) -> Result<(), InvalidAction> {
        if from == to {
            return Err(InvalidAction::UpgradeToSelf);
        }
        if self.current_board().pieces[from] == 0 {
            return Err(InvalidAction::UpgradeFromUnowned { kind: from });
        }
        if self.bank[to] == 0 {
            return Err(InvalidAction::UpgradeTargetExhausted { kind: to });
        }
        let (from_size, to_size) = (from.footprint(), to.footprint());
        if to_size != from_size && to_size != from_size + 1 {
            return Err(InvalidAction::BadUpgradeStep {
                from: from_size,
                to: to_size,
            });
        }

        let board = self.current_board_mut();
        board.pieces[from] -= 1;
        board.pieces[to] += 1;
        self.bank[from] += 1;
        self.bank[to] -= 1;
        Ok(())
    }

    fn take_puzzle(&mut self, slot: u8) -> Result<(), InvalidAction> {
        if slot >= SLOT_COUNT {
            return Err(InvalidAction::SlotOutOfRange { slot });
        }
        if self.current_board().puzzles.len() >= MAX_PLAYER_PUZZLES {
            return Err(InvalidAction::PuzzleLimitReached);
        }
        if self.supply.slot(slot).is_none() {
            return Err(InvalidAction::EmptySlot { slot });
        }

        let puzzle = self
            .supply
            .clear_slot(slot)
            .expect("slot checked non-empty");
        self.current_board_mut().puzzles.push(puzzle);
        Ok(())
    }

    fn place_piece(&mut self, placement: &Placement) -> Result<(), InvalidAction> {
        let board = self.current_board();
        let puzzle = board
            .puzzles
            .get(placement.puzzle)
            .ok_or(InvalidAction::NoSuchPuzzle {
                index: placement.puzzle,
            })?;
        if board.pieces[placement.piece] == 0 {
            return Err(InvalidAction::PieceNotOwned {
                kind: placement.piece,
            });
        }
        if !puzzle.fits(
            placement.x,
            placement.y,
            placement.piece,
            placement.rotation,
            placement.reflected,
        ) {
            return Err(InvalidAction::DoesNotFit {
                piece: placement.piece,
                x: placement.x,
                y: placement.y,
            });
        }

        let board = self.current_board_mut();
        board.pieces[placement.piece] -= 1;
        board.puzzles[placement.puzzle].place(
            placement.x,
            placement.y,
            placement.piece,
            placement.rotation,
            placement.reflected,
        );
        Ok(())
    }

    fn master_action(&mut self, placements: &[Placement]) -> Result<(), InvalidAction> {
        if self.master_used {
            return Err(InvalidAction::MasterAlreadyUsed);
        }

        let board = self.current_board();
        if board.puzzles.is_empty() {
            return Err(InvalidAction::NoPuzzlesForMaster);
        }

        let mut usage = PieceCounts::new();
        for placement in placements {
            usage[placement.piece] += 1;
        }
        for (kind, used) in usage.iter() {
            if used > board.pieces[kind] {
                return Err(InvalidAction::NotEnoughPiecesForMaster { kind });
            }
        }

        let mut covered = [false; MAX_PLAYER_PUZZLES];
        for placement in placements {
            if placement.puzzle >= board.puzzles.len() {
                return Err(InvalidAction::MasterPuzzleMismatch);
            }
            if covered[placement.puzzle] {
                return Err(InvalidAction::DuplicateMasterPuzzle {
                    index: placement.puzzle,
                });
            }
            covered[placement.puzzle] = true;
        }
        if placements.len() != board.puzzles.len() {
            return Err(InvalidAction::MasterPuzzleMismatch);
        }

        // All-or-nothing: play the whole sequence out on scratch copies and
        // commit only a fully successful run.
        let mut scratch_pieces = board.pieces;
        let mut scratch_puzzles = board.puzzles.clone();
        for (index, placement) in placements.iter().enumerate() {
            let puzzle = &mut scratch_puzzles[placement.puzzle];
            if !puzzle.fits(
                placement.x,
                placement.y,
                placement.piece,
                placement.rotation,
                placement.reflected,
            ) {
                return Err(InvalidAction::MasterPlacementIllegal {
                    index,
                    err: Box::new(InvalidAction::DoesNotFit {
                        piece: placement.piece,
                        x: placement.x,
                        y: placement.y,
                    }),
                });
            }
            scratch_pieces[placement.piece] -= 1;
            puzzle.place(
                placement.x,
                placement.y,
                placement.piece,
                placement.rotation,
                placement.reflected,
            );
        }

        let board = self.current_board_mut();
        board.pieces = scratch_pieces;
        board.puzzles = scratch_puzzles;
        self.master_used = true;
        Ok(())
    }

    /// Score and dismantle every completed puzzle of the current player.
    ///
    /// Removal is by explicit index, so identical puzzle instances settle
    /// one at a time.
    fn settle_completed_puzzles(&mut self) {
        let player = self.current_player;
        let mut index = 0;
        while index < self.players[player].puzzles.len() {
            if !self.players[player].puzzles[index].is_complete() {
                index += 1;
                continue;
            }

            let puzzle = self.players[player].puzzles.remove(index);
            let board = &mut self.players[player];
            board.points += puzzle.points;
            if self.bank[puzzle.reward] > 0 {
                self.bank[puzzle.reward] -= 1;
                board.pieces[puzzle.reward] += 1;
            }

            // Return every placed piece: cells per kind divided by the
            // kind's footprint. A remainder means the grid is corrupt.
            let cell_counts = puzzle.placed_cell_counts();
            for kind in PieceKind::ALL {
                let cells = cell_counts[kind.index()];
                assert!(
                    cells % kind.footprint() == 0,
                    "corrupted puzzle grid: {cells} cells of {kind} with footprint {}",
                    kind.footprint()
                );
                board.pieces[kind] += cells / kind.footprint();
            }

            trace!(%player, points = puzzle.points, reward = %puzzle.reward, "puzzle completed");
        }
    }
}

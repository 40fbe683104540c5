//! The error type for [`GameState::step`](crate::core::GameState::step).
//!
//! Every rule violation maps to one `InvalidAction` variant; the enumerator
//! treats these as "candidate is illegal" and drops the candidate, while a
//! direct `step` caller sees them as a hard failure with the state left
//! untouched. Internal invariant violations (model corruption) are *not*
//! represented here; those panic.

use crate::pieces::PieceKind;

/// Why an action was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidAction {
    /// The bank has no base single-cell pieces left to draw.
    NoBasicPiecesLeft,
    /// Upgrading a piece to itself.
    UpgradeToSelf,
    /// The player owns no piece of the source kind.
    UpgradeFromUnowned { kind: PieceKind },
    /// The bank has none of the target kind.
    UpgradeTargetExhausted { kind: PieceKind },
    /// The target footprint is neither equal to nor one above the source's.
    BadUpgradeStep { from: u32, to: u32 },
    /// Take-puzzle slot index outside 0-7.
    SlotOutOfRange { slot: u8 },
    /// The player already holds the maximum number of puzzles.
    PuzzleLimitReached,
    /// The addressed face-up slot is empty.
    EmptySlot { slot: u8 },
    /// Place-piece puzzle index beyond the player's puzzle list.
    NoSuchPuzzle { index: usize },
    /// The player owns no piece of the kind being placed.
    PieceNotOwned { kind: PieceKind },
    /// The footprint leaves the grid or lands on a non-empty cell.
    DoesNotFit { piece: PieceKind, x: u8, y: u8 },
    /// The master action was already used this turn.
    MasterAlreadyUsed,
    /// Master action with no owned puzzles.
    NoPuzzlesForMaster,
    /// Two master placements target the same puzzle.
    DuplicateMasterPuzzle { index: usize },
    /// Master placements do not cover the player's puzzle list exactly.
    MasterPuzzleMismatch,
    /// Master placements use more pieces of a kind than the player owns.
    NotEnoughPiecesForMaster { kind: PieceKind },
    /// One constituent placement of a master action is illegal.
    MasterPlacementIllegal {
        index: usize,
        err: Box<InvalidAction>,
    },
    /// Final phase accepts only Place-piece and Stop.
    FinalPhaseRestriction,
    /// Stop is only legal during the final phase.
    StopOutsideFinalPhase,
}

impl std::error::Error for InvalidAction {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvalidAction::MasterPlacementIllegal { err, .. } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvalidAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidAction::NoBasicPiecesLeft => {
                write!(f, "there are no more basic pieces in the bank")
            }
            InvalidAction::UpgradeToSelf => write!(f, "cannot upgrade a piece to itself"),
            InvalidAction::UpgradeFromUnowned { kind } => {
                write!(f, "cannot upgrade a {kind} the player does not own")
            }
            InvalidAction::UpgradeTargetExhausted { kind } => {
                write!(f, "the bank has no {kind} left to upgrade into")
            }
            InvalidAction::BadUpgradeStep { from, to } => {
                write!(f, "bad piece upgrade ({from} -> {to} cells)")
            }
            InvalidAction::SlotOutOfRange { slot } => {
                write!(f, "slot {slot} is not a face-up slot (0-7)")
            }
            InvalidAction::PuzzleLimitReached => {
                write!(f, "a player can hold at most 4 puzzles")
            }
            InvalidAction::EmptySlot { slot } => {
                write!(f, "slot {slot} holds no puzzle")
            }
            InvalidAction::NoSuchPuzzle { index } => {
                write!(f, "the player holds no puzzle at index {index}")
            }
            InvalidAction::PieceNotOwned { kind } => {
                write!(f, "cannot place a {kind} the player does not own")
            }
            InvalidAction::DoesNotFit { piece, x, y } => {
                write!(f, "{piece} does not fit at ({x}, {y})")
            }
            InvalidAction::MasterAlreadyUsed => {
                write!(f, "the master action was already used this turn")
            }
            InvalidAction::NoPuzzlesForMaster => {
                write!(f, "no puzzles to target with the master action")
            }
            InvalidAction::DuplicateMasterPuzzle { index } => {
                write!(f, "master action targets puzzle {index} twice")
            }
            InvalidAction::MasterPuzzleMismatch => {
                write!(f, "master action must place into every held puzzle exactly once")
            }
            InvalidAction::NotEnoughPiecesForMaster { kind } => {
                write!(f, "master action uses more {kind} pieces than the player owns")
            }
            InvalidAction::MasterPlacementIllegal { index, err } => {
                write!(f, "master placement {index} is illegal: {err}")
            }
            InvalidAction::FinalPhaseRestriction => {
                write!(f, "only placements and stop are allowed in the final phase")
            }
            InvalidAction::StopOutsideFinalPhase => {
                write!(f, "stop is only allowed in the final phase")
            }
        }
    }
}

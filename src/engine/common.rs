//! Common types for BattleBoats: square states, attack outcomes and board errors.

use super::bitboard::BitBoardError;
use super::config::SHIPS;
use super::ship::ShipKind;

/// Contents of a single field square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum SquareState {
    /// Known to hold no ship.
    Empty,
    /// Not yet attacked on the opponent's field.
    Unknown,
    Hit,
    Miss,
    /// Holds a segment of the given ship.
    Occupied(ShipKind),
    /// Returned for coordinates outside the field; never stored.
    Invalid,
    /// Selection marker for interactive displays.
    Cursor,
}

/// Result of resolving an attack at a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    Miss,
    Hit,
    /// The hit took the last segment of the named ship.
    ShipSunk(ShipKind),
}

impl AttackOutcome {
    /// Integer code carried in a `Result` message.
    pub fn code(self) -> u32 {
        match self {
            AttackOutcome::Miss => 0,
            AttackOutcome::Hit => 1,
            AttackOutcome::ShipSunk(kind) => 2 + kind.index() as u32,
        }
    }

    /// Inverse of [`AttackOutcome::code`].
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(AttackOutcome::Miss),
            1 => Some(AttackOutcome::Hit),
            n => SHIPS
                .get(n.checked_sub(2)? as usize)
                .map(|&kind| AttackOutcome::ShipSunk(kind)),
        }
    }

    pub fn is_hit(self) -> bool {
        !matches!(self, AttackOutcome::Miss)
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error (e.g., invalid size or index).
    BitBoardError(BitBoardError),
    /// Coordinates lie outside the field.
    OutOfBounds { row: usize, col: usize },
    /// Attempted to place a ship kind that is still afloat on this board.
    ShipAlreadyPlaced(ShipKind),
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Ship placement extends past the edge of the field.
    ShipOutOfBounds,
    /// Random placement exhausted its attempt budget.
    UnableToPlaceShip(ShipKind),
    /// No square is left to guess on the knowledge board.
    NoUnknownSquares,
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::OutOfBounds { row, col } => {
                write!(f, "Square ({}, {}) is outside the field", row, col)
            }
            BoardError::ShipAlreadyPlaced(kind) => {
                write!(f, "The {} ship is already on the board", kind.name())
            }
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::UnableToPlaceShip(kind) => {
                write!(f, "Unable to place the {} ship", kind.name())
            }
            BoardError::NoUnknownSquares => write!(f, "No unknown squares left to guess"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

//! Ship kinds and placement footprints using our `BitBoard`.

use super::bitboard::BitBoard;
use super::common::BoardError;
use super::config::{
    FIELD_COLS, FIELD_ROWS, HUGE_SHIP_LEN, LARGE_SHIP_LEN, MEDIUM_SHIP_LEN, SMALL_SHIP_LEN,
};

/// Footprint mask over the whole field.
pub type FieldMask = BitBoard<u64, FIELD_ROWS, FIELD_COLS>;

/// Direction a ship extends from its pivot cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    East,
    South,
}

/// The four fixed ship classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipKind {
    Small,
    Medium,
    Large,
    Huge,
}

impl ShipKind {
    /// Number of cells the ship occupies.
    pub const fn length(self) -> u8 {
        match self {
            ShipKind::Small => SMALL_SHIP_LEN,
            ShipKind::Medium => MEDIUM_SHIP_LEN,
            ShipKind::Large => LARGE_SHIP_LEN,
            ShipKind::Huge => HUGE_SHIP_LEN,
        }
    }

    /// Position in [`SHIPS`](super::config::SHIPS) and in per-ship arrays.
    pub const fn index(self) -> usize {
        match self {
            ShipKind::Small => 0,
            ShipKind::Medium => 1,
            ShipKind::Large => 2,
            ShipKind::Huge => 3,
        }
    }

    /// Bit for this kind in the liveness mask; smallest ship is the LSB.
    pub const fn status_bit(self) -> u8 {
        1 << self.index()
    }

    pub fn name(self) -> &'static str {
        match self {
            ShipKind::Small => "small",
            ShipKind::Medium => "medium",
            ShipKind::Large => "large",
            ShipKind::Huge => "huge",
        }
    }
}

/// A candidate placement, validated against the field before it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipPlacement {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
    pub kind: ShipKind,
}

impl ShipPlacement {
    pub fn new(row: usize, col: usize, orientation: Orientation, kind: ShipKind) -> Self {
        Self {
            row,
            col,
            orientation,
            kind,
        }
    }

    /// Cells covered by the ship, starting at the pivot.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (row, col, orientation) = (self.row, self.col, self.orientation);
        (0..self.kind.length() as usize).map(move |i| match orientation {
            Orientation::East => (row, col + i),
            Orientation::South => (row + i, col),
        })
    }

    /// Occupancy mask of the placement. Fails if any cell leaves the field.
    pub fn mask(&self) -> Result<FieldMask, BoardError> {
        let len = self.kind.length() as usize;
        let fits = match self.orientation {
            Orientation::East => self.row < FIELD_ROWS && self.col + len <= FIELD_COLS,
            Orientation::South => self.col < FIELD_COLS && self.row + len <= FIELD_ROWS,
        };
        if !fits {
            return Err(BoardError::ShipOutOfBounds);
        }
        Ok(FieldMask::from_cells(self.cells())?)
    }
}

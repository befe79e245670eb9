//! Field state: ship placement, attack resolution and knowledge tracking.
//!
//! A game uses two boards per player. The *own* board holds the player's
//! real ships and starts out [`SquareState::Empty`]; the *knowledge* board
//! is the player's view of the opponent and starts out
//! [`SquareState::Unknown`]. Ship identities only appear on a knowledge
//! board through sunk reports.

use super::common::{AttackOutcome, BoardError, SquareState};
use super::config::{ALL_SHIPS_SUNK, FIELD_COLS, FIELD_ROWS, NUM_SHIPS, SHIPS};
use super::ship::{FieldMask, ShipKind, ShipPlacement};
use core::fmt;

#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    grid: [[SquareState; FIELD_COLS]; FIELD_ROWS],
    lives: [u8; NUM_SHIPS],
}

/// Reset a board pair for the start of a game.
///
/// The knowledge board gets full health for every enemy ship; the own
/// board's health is filled in as ships are placed.
pub fn initialize(own: &mut Board, knowledge: &mut Board) {
    *own = Board::new_own();
    *knowledge = Board::new_knowledge();
}

impl Board {
    /// An own board: every square empty, no ships afloat.
    pub fn new_own() -> Self {
        Self {
            grid: [[SquareState::Empty; FIELD_COLS]; FIELD_ROWS],
            lives: [0; NUM_SHIPS],
        }
    }

    /// A knowledge board: every square unknown, every enemy ship at full health.
    pub fn new_knowledge() -> Self {
        Self {
            grid: [[SquareState::Unknown; FIELD_COLS]; FIELD_ROWS],
            lives: SHIPS.map(ShipKind::length),
        }
    }

    /// Square at (row, col), or [`SquareState::Invalid`] off the field.
    pub fn square(&self, row: usize, col: usize) -> SquareState {
        if row >= FIELD_ROWS || col >= FIELD_COLS {
            return SquareState::Invalid;
        }
        self.grid[row][col]
    }

    /// Overwrite a single square, returning its previous value.
    pub fn set_square(
        &mut self,
        row: usize,
        col: usize,
        state: SquareState,
    ) -> Result<SquareState, BoardError> {
        if row >= FIELD_ROWS || col >= FIELD_COLS {
            return Err(BoardError::OutOfBounds { row, col });
        }
        Ok(core::mem::replace(&mut self.grid[row][col], state))
    }

    /// Remaining health of a ship kind.
    pub fn lives(&self, kind: ShipKind) -> u8 {
        self.lives[kind.index()]
    }

    /// Squares currently matching `pred`, as a mask.
    fn mask_where(&self, pred: impl Fn(SquareState) -> bool) -> FieldMask {
        let mut mask = FieldMask::new();
        for (r, row) in self.grid.iter().enumerate() {
            for (c, &sq) in row.iter().enumerate() {
                if pred(sq) {
                    // in bounds by construction
                    let _ = mask.set(r, c);
                }
            }
        }
        mask
    }

    /// Mask of squares holding any ship segment.
    pub fn occupied_mask(&self) -> FieldMask {
        self.mask_where(|sq| matches!(sq, SquareState::Occupied(_)))
    }

    /// Mask of squares still open to guessing.
    pub fn unknown_mask(&self) -> FieldMask {
        self.mask_where(|sq| sq == SquareState::Unknown)
    }

    /// Place a ship, all or nothing.
    ///
    /// Every covered square must be on the field and empty. On success the
    /// squares take the ship's marker and its health is set to its length;
    /// on failure the board is untouched.
    pub fn place_ship(&mut self, placement: ShipPlacement) -> Result<(), BoardError> {
        let kind = placement.kind;
        if self.lives(kind) > 0 {
            return Err(BoardError::ShipAlreadyPlaced(kind));
        }
        let mask = placement.mask()?;
        let free = self.mask_where(|sq| sq == SquareState::Empty);
        if (mask & free) != mask {
            return Err(BoardError::ShipOverlaps);
        }
        for (r, c) in placement.cells() {
            self.grid[r][c] = SquareState::Occupied(kind);
        }
        self.lives[kind.index()] = kind.length();
        Ok(())
    }

    /// Apply an opponent's shot to this own board.
    ///
    /// Re-attacking a resolved square reports its earlier outcome without
    /// touching any health counter.
    pub fn resolve_incoming_attack(
        &mut self,
        row: usize,
        col: usize,
    ) -> Result<AttackOutcome, BoardError> {
        match self.square(row, col) {
            SquareState::Invalid => Err(BoardError::OutOfBounds { row, col }),
            SquareState::Occupied(kind) => {
                self.grid[row][col] = SquareState::Hit;
                let lives = &mut self.lives[kind.index()];
                *lives = lives.saturating_sub(1);
                if *lives == 0 {
                    Ok(AttackOutcome::ShipSunk(kind))
                } else {
                    Ok(AttackOutcome::Hit)
                }
            }
            SquareState::Hit => Ok(AttackOutcome::Hit),
            SquareState::Miss => Ok(AttackOutcome::Miss),
            SquareState::Empty | SquareState::Unknown | SquareState::Cursor => {
                self.grid[row][col] = SquareState::Miss;
                Ok(AttackOutcome::Miss)
            }
        }
    }

    /// Record the outcome of our own shot on this knowledge board.
    ///
    /// Hits mark the square; misses mark it empty; a sunk report clears that
    /// ship's remaining health.
    pub fn apply_outgoing_result(
        &mut self,
        row: usize,
        col: usize,
        outcome: AttackOutcome,
    ) -> Result<(), BoardError> {
        let state = match outcome {
            AttackOutcome::Miss => SquareState::Empty,
            AttackOutcome::Hit | AttackOutcome::ShipSunk(_) => SquareState::Hit,
        };
        self.set_square(row, col, state)?;
        if let AttackOutcome::ShipSunk(kind) = outcome {
            self.lives[kind.index()] = 0;
        }
        Ok(())
    }

    /// Liveness mask: bit `kind.status_bit()` is set while that ship has health left.
    pub fn boat_states(&self) -> u8 {
        SHIPS
            .iter()
            .filter(|&&kind| self.lives(kind) > 0)
            .fold(0, |acc, kind| acc | kind.status_bit())
    }

    /// Returns `true` when every ship on this board has been sunk.
    pub fn all_ships_sunk(&self) -> bool {
        self.boat_states() == ALL_SHIPS_SUNK
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new_own()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ lives: {:?}, states: {:#06b} }}", self.lives, self.boat_states())?;
        for row in self.grid.iter() {
            for sq in row.iter() {
                let ch = match sq {
                    SquareState::Empty => '.',
                    SquareState::Unknown => '?',
                    SquareState::Hit => 'X',
                    SquareState::Miss => 'o',
                    SquareState::Occupied(kind) => match kind {
                        ShipKind::Small => 'S',
                        ShipKind::Medium => 'M',
                        ShipKind::Large => 'L',
                        ShipKind::Huge => 'H',
                    },
                    SquareState::Invalid => '!',
                    SquareState::Cursor => '+',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

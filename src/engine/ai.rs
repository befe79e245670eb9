// Automated placement and targeting for an agent.
// Uses no_std and avoids heap allocations.

use super::board::Board;
use super::common::BoardError;
use super::config::{FIELD_COLS, FIELD_ROWS, MAX_PLACEMENT_ATTEMPTS, SHIPS};
use super::ship::{Orientation, ShipKind, ShipPlacement};
use rand::Rng;

/// Draw a uniformly random pivot and orientation for `kind`.
///
/// The result may run off the field or overlap; `Board::place_ship`
/// decides.
pub fn random_placement<R: Rng + ?Sized>(rng: &mut R, kind: ShipKind) -> ShipPlacement {
    let orientation = if rng.random() {
        Orientation::East
    } else {
        Orientation::South
    };
    let row = rng.random_range(0..FIELD_ROWS);
    let col = rng.random_range(0..FIELD_COLS);
    ShipPlacement::new(row, col, orientation, kind)
}

/// Place a single ship by random retry, giving up after
/// [`MAX_PLACEMENT_ATTEMPTS`] rejected draws.
pub fn auto_place_ship<R: Rng + ?Sized>(
    rng: &mut R,
    board: &mut Board,
    kind: ShipKind,
) -> Result<ShipPlacement, BoardError> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let placement = random_placement(rng, kind);
        match board.place_ship(placement) {
            Ok(()) => return Ok(placement),
            Err(BoardError::ShipOutOfBounds) | Err(BoardError::ShipOverlaps) => continue,
            Err(e) => return Err(e),
        }
    }
    Err(BoardError::UnableToPlaceShip(kind))
}

/// Place every ship kind on an own board, largest first.
pub fn auto_place_all_ships<R: Rng + ?Sized>(
    rng: &mut R,
    board: &mut Board,
) -> Result<(), BoardError> {
    for &kind in SHIPS.iter().rev() {
        let placement = auto_place_ship(rng, board, kind)?;
        log::trace!(
            "placed {} ship at ({}, {}) facing {:?}",
            kind.name(),
            placement.row,
            placement.col,
            placement.orientation
        );
    }
    Ok(())
}

/// Pick the next square to attack, uniformly among the knowledge board's
/// unknown squares. Never returns a square that has already been resolved.
pub fn decide_next_guess<R: Rng + ?Sized>(
    rng: &mut R,
    knowledge: &Board,
) -> Result<(usize, usize), BoardError> {
    let open = knowledge.unknown_mask();
    let count = open.count_ones();
    if count == 0 {
        return Err(BoardError::NoUnknownSquares);
    }
    let pick = rng.random_range(0..count);
    open.iter_set_bits()
        .nth(pick)
        .ok_or(BoardError::NoUnknownSquares)
}

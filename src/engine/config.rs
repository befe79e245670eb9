use super::ship::ShipKind;

/// Rows on the field. Both peers must agree on this value.
pub const FIELD_ROWS: usize = 6;
/// Columns on the field. Both peers must agree on this value.
pub const FIELD_COLS: usize = 10;

pub const NUM_SHIPS: usize = 4;

/// Every ship kind, smallest first. Index order matches the liveness mask bits.
pub const SHIPS: [ShipKind; NUM_SHIPS] = [
    ShipKind::Small,
    ShipKind::Medium,
    ShipKind::Large,
    ShipKind::Huge,
];

pub const SMALL_SHIP_LEN: u8 = 2;
pub const MEDIUM_SHIP_LEN: u8 = 3;
pub const LARGE_SHIP_LEN: u8 = 4;
pub const HUGE_SHIP_LEN: u8 = 5;

/// Total number of ship segments in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize =
    (SMALL_SHIP_LEN + MEDIUM_SHIP_LEN + LARGE_SHIP_LEN + HUGE_SHIP_LEN) as usize;

/// Random placement tries per ship before auto-placement gives up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Liveness mask value once every ship has been sunk.
pub const ALL_SHIPS_SUNK: u8 = 0b0000;

const _: () = assert!(FIELD_ROWS * FIELD_COLS <= 64, "field must fit in a u64 bitboard");
const _: () = assert!(HUGE_SHIP_LEN as usize <= FIELD_ROWS && HUGE_SHIP_LEN as usize <= FIELD_COLS);

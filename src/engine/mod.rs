//! Core BattleBoats engine (no_std compatible)
//!
//! Pure game logic: boards, ship placement, attack resolution, the
//! commit-reveal coin flip and the per-session agent. Usable without an
//! allocator or an async runtime.

pub mod agent;
pub mod ai;
pub mod bitboard;
pub mod board;
pub mod common;
pub mod config;
pub mod negotiation;
pub mod ship;

// Re-export commonly used types
pub use agent::{Agent, AgentState, EndReason, FieldView, Step, Turn};
pub use ai::{auto_place_all_ships, auto_place_ship, decide_next_guess, random_placement};
pub use bitboard::{BitBoard, BitBoardError};
pub use board::Board;
pub use common::{AttackOutcome, BoardError, SquareState};
pub use config::*;
pub use negotiation::{
    commit, decide_coin_flip, generate_nonce, generate_secret, verify_commitment, CoinFlip,
    Commitment, Negotiation, Nonce, Role, Secret, COMMITMENT_WORDS,
};
pub use ship::{FieldMask, Orientation, ShipKind, ShipPlacement};

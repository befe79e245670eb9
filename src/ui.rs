//! Plain-text rendering of an agent's view.

use std::fmt::Write;

use crate::engine::agent::{FieldView, Turn};
use crate::engine::board::Board;
use crate::engine::common::SquareState;
use crate::engine::config::{FIELD_COLS, FIELD_ROWS};
use crate::engine::ship::ShipKind;

fn square_char(sq: SquareState) -> char {
    match sq {
        SquareState::Empty => '.',
        SquareState::Unknown => ' ',
        SquareState::Hit => 'X',
        SquareState::Miss => 'o',
        SquareState::Occupied(ShipKind::Small) => 'S',
        SquareState::Occupied(ShipKind::Medium) => 'M',
        SquareState::Occupied(ShipKind::Large) => 'L',
        SquareState::Occupied(ShipKind::Huge) => 'H',
        SquareState::Cursor => '+',
        SquareState::Invalid => '!',
    }
}

fn board_row(out: &mut String, board: &Board, row: usize) {
    let _ = write!(out, "{:2} |", row);
    for col in 0..FIELD_COLS {
        let _ = write!(out, "{}", square_char(board.square(row, col)));
    }
    out.push('|');
}

/// Own board and knowledge board side by side, followed by the turn line
/// and any status message.
pub fn render_view(view: &FieldView<'_>) -> String {
    let mut out = String::new();
    let header: String = (0..FIELD_COLS)
        .map(|c| char::from_digit(c as u32 % 10, 10).unwrap_or('?'))
        .collect();
    let _ = writeln!(out, "    {}       {}", header, header);
    for row in 0..FIELD_ROWS {
        board_row(&mut out, view.own, row);
        out.push_str("  ");
        board_row(&mut out, view.knowledge, row);
        out.push('\n');
    }
    let turn = match view.turn {
        Turn::None => "-",
        Turn::Mine => "mine",
        Turn::Theirs => "theirs",
    };
    let _ = writeln!(out, "turn: {}  shots: {}", turn, view.turn_count);
    if let Some(status) = view.status {
        let _ = writeln!(out, "{}", status);
    }
    out
}

pub fn print_view(view: &FieldView<'_>) {
    std::println!("\n{}", render_view(view));
}

//! Text board for the terminal front end
//!
//! Rows are drawn top to bottom as the player sees them, labelled 0-7 on
//! the left (the row number a click uses) and a-h underneath.

use std::fmt::Write;

use crate::game::coordinates::to_absolute;
use crate::game::rules::{BoardStore, Cell};
use shared::protocol::{Color, Piece, PieceKind};

/// Letter for a piece: uppercase White, lowercase Black
pub fn piece_glyph(piece: Piece) -> char {
    let glyph = match piece.kind {
        PieceKind::Rook => 'R',
        PieceKind::Knight => 'N',
        PieceKind::Bishop => 'B',
        PieceKind::Queen => 'Q',
        PieceKind::King => 'K',
        PieceKind::Pawn => 'P',
    };
    match piece.color {
        Color::White => glyph,
        Color::Black => glyph.to_ascii_lowercase(),
    }
}

pub fn cell_glyph(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Marker => '*',
        Cell::Piece(piece) => piece_glyph(piece),
    }
}

/// Render `board` as seen from `perspective`
pub fn render_board(board: &BoardStore, perspective: Color) -> String {
    let mut out = String::with_capacity(8 * 20 + 20);
    for row in 0..8u8 {
        let _ = write!(out, "{row} ");
        for col in 0..8u8 {
            let cell = board.get(to_absolute(row, col, perspective));
            out.push(' ');
            out.push(cell_glyph(cell));
        }
        out.push('\n');
    }
    out.push_str("  ");
    for file in 'a'..='h' {
        out.push(' ');
        out.push(file);
    }
    out.push('\n');
    out
}

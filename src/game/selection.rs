//! Selection tracking and click resolution
//!
//! At most one selection is active. While it is, every marker on the board
//! is a candidate destination of the selected piece.

use std::collections::BTreeSet;

use crate::game::coordinates::rank_of;
use crate::game::rules::piece_moves::{candidate_squares, pawn_start_and_direction};
use crate::game::rules::{BoardStore, Cell};
use shared::protocol::{Color, Move, PieceKind, Square};

/// What a click on an absolute square resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click has no effect in the current state.
    Ignored,
    Selected { origin: Square, candidates: usize },
    Deselected,
    /// A marker was clicked; the move is ready to be committed.
    Commit(Move),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    origin: Option<Square>,
    candidates: BTreeSet<Square>,
}

impl Selection {
    pub fn origin(&self) -> Option<Square> {
        self.origin
    }

    pub fn candidates(&self) -> &BTreeSet<Square> {
        &self.candidates
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    pub fn clear(&mut self) {
        self.origin = None;
        self.candidates.clear();
    }

    /// Drop the selection and its markers from `board`
    pub fn cancel(&mut self, board: &mut BoardStore) {
        self.clear();
        board.clear_markers();
    }

    /// Resolve a click on `square` for the player holding `mover`
    ///
    /// Invariant: the render surface only forwards clicks on squares it drew,
    /// so the ignored branches below are states it never produces on purpose.
    pub fn handle_click(
        &mut self,
        board: &mut BoardStore,
        square: Square,
        mover: Color,
    ) -> ClickOutcome {
        if let Some(origin) = self.origin {
            if board.get(square).is_marker() {
                let mv = build_move(board, origin, square, mover);
                self.cancel(board);
                return ClickOutcome::Commit(mv);
            }
            if square == origin {
                self.cancel(board);
                return ClickOutcome::Deselected;
            }
            return ClickOutcome::Ignored;
        }

        let piece = match board.get(square) {
            Cell::Piece(piece) if piece.color == mover => piece,
            _ => return ClickOutcome::Ignored,
        };

        let candidates = candidate_squares(board, square, piece, mover);
        if candidates.is_empty() {
            return ClickOutcome::Ignored;
        }

        board.clear_markers();
        for &target in &candidates {
            board.set(target, Cell::Marker);
        }

        let count = candidates.len();
        self.origin = Some(square);
        self.candidates = candidates;
        ClickOutcome::Selected {
            origin: square,
            candidates: count,
        }
    }
}

/// Pawns reaching the far rank are promoted to a queen.
fn build_move(board: &BoardStore, from: Square, to: Square, mover: Color) -> Move {
    let (_, direction) = pawn_start_and_direction(mover);
    let far_rank = if direction < 0 { 0 } else { 7 };
    let promotion = match board.get(from).piece() {
        Some(piece) if piece.kind == PieceKind::Pawn && rank_of(to) == far_rank => {
            Some(PieceKind::Queen)
        }
        _ => None,
    };
    Move {
        from,
        to,
        promotion,
    }
}

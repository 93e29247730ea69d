//! Move-candidate generation for the selection preview
//!
//! Pure functions from a board snapshot to the set of squares a piece could
//! move to. This is advisory only: captures, check safety, castling, en
//! passant and promotion choice are left to the server. Every scan stops at
//! the first occupied square without marking it, so only empty squares are
//! ever offered.

use std::collections::BTreeSet;

use super::board_state::BoardStore;
use crate::game::coordinates::{file_of, rank_of, square_of};
use shared::protocol::{Color, Piece, PieceKind, Square};

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Squares the piece on `origin` could move to
///
/// `mover` only decides the pawn direction: White pawns advance toward
/// rank 0, Black pawns toward rank 7.
pub fn candidate_squares(
    board: &BoardStore,
    origin: Square,
    piece: Piece,
    mover: Color,
) -> BTreeSet<Square> {
    let mut squares = BTreeSet::new();

    match piece.kind {
        PieceKind::Pawn => pawn_candidates(board, origin, mover, &mut squares),
        PieceKind::Rook => ray_candidates(board, origin, &ROOK_DIRECTIONS, &mut squares),
        PieceKind::Bishop => ray_candidates(board, origin, &BISHOP_DIRECTIONS, &mut squares),
        PieceKind::Queen => {
            ray_candidates(board, origin, &ROOK_DIRECTIONS, &mut squares);
            ray_candidates(board, origin, &BISHOP_DIRECTIONS, &mut squares);
        }
        PieceKind::King => step_candidates(board, origin, &KING_OFFSETS, &mut squares),
        PieceKind::Knight => step_candidates(board, origin, &KNIGHT_OFFSETS, &mut squares),
    }

    squares
}

/// Rank a pawn of `color` starts on, and the direction it advances in
pub fn pawn_start_and_direction(color: Color) -> (u8, i8) {
    match color {
        Color::White => (6, -1),
        Color::Black => (1, 1),
    }
}

/// Square at `(rank + d_rank, file + d_file)`, or `None` off the board
fn offset(origin: Square, d_rank: i8, d_file: i8) -> Option<Square> {
    let rank = rank_of(origin) as i8 + d_rank;
    let file = file_of(origin) as i8 + d_file;
    if (0..8).contains(&rank) && (0..8).contains(&file) {
        Some(square_of(rank as u8, file as u8))
    } else {
        None
    }
}

fn pawn_candidates(
    board: &BoardStore,
    origin: Square,
    mover: Color,
    squares: &mut BTreeSet<Square>,
) {
    let (start_rank, direction) = pawn_start_and_direction(mover);

    // Blocked (or off the board) one step ahead means nothing at all.
    let Some(one_step) = offset(origin, direction, 0).filter(|sq| board.is_empty(*sq)) else {
        return;
    };
    squares.insert(one_step);

    if rank_of(origin) == start_rank {
        if let Some(two_step) = offset(origin, 2 * direction, 0).filter(|sq| board.is_empty(*sq)) {
            squares.insert(two_step);
        }
    }
}

fn ray_candidates(
    board: &BoardStore,
    origin: Square,
    directions: &[(i8, i8)],
    squares: &mut BTreeSet<Square>,
) {
    for &(d_rank, d_file) in directions {
        let mut current = origin;
        while let Some(next) = offset(current, d_rank, d_file) {
            if !board.is_empty(next) {
                break;
            }
            squares.insert(next);
            current = next;
        }
    }
}

fn step_candidates(
    board: &BoardStore,
    origin: Square,
    offsets: &[(i8, i8)],
    squares: &mut BTreeSet<Square>,
) {
    squares.extend(
        offsets
            .iter()
            .filter_map(|&(d_rank, d_file)| offset(origin, d_rank, d_file))
            .filter(|sq| board.is_empty(*sq)),
    );
}

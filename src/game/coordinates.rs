//! Absolute <-> per-player coordinate transform
//!
//! The server always speaks in one fixed absolute orientation. Only the
//! player holding Black sees the board rotated by 180 degrees, so the
//! transform is a bijection over the 64 squares for either perspective.

use shared::protocol::{Color, Square};

/// Absolute index of `(rank, file)`, both in 0..8
pub fn square_of(rank: u8, file: u8) -> Square {
    rank * 8 + file
}

pub fn rank_of(square: Square) -> u8 {
    square / 8
}

pub fn file_of(square: Square) -> u8 {
    square % 8
}

/// Convert a visual `(rank, file)` seen from `perspective` to an absolute square.
pub fn to_absolute(rank: u8, file: u8, perspective: Color) -> Square {
    match perspective {
        Color::Black => square_of(7 - rank, 7 - file),
        Color::White => square_of(rank, file),
    }
}

/// Inverse of [`to_absolute`].
pub fn to_rank_file(square: Square, perspective: Color) -> (u8, u8) {
    let (rank, file) = (rank_of(square), file_of(square));
    match perspective {
        Color::Black => (7 - rank, 7 - file),
        Color::White => (rank, file),
    }
}

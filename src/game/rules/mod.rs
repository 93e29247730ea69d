//! Board rules module - pure board logic without networking coupling
//!
//! # Module Structure
//!
//! - `board_state` - The versioned 64-square board store
//! - `piece_moves` - Candidate destinations per piece kind (preview only)
//!
//! The server owns the real chess rules; nothing here decides legality.

pub mod board_state;
pub mod piece_moves;


// Re-export commonly used items
pub use board_state::{BoardStore, Cell, SQUARE_COUNT};
pub use piece_moves::candidate_squares;

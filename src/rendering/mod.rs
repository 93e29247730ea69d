//! Terminal render surface

pub mod board;
pub mod status;

pub use board::render_board;
pub use status::render_status;

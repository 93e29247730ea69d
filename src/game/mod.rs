//! Client-side board model
//!
//! - `rules` - board store and candidate generation
//! - `coordinates` - absolute <-> player orientation
//! - `selection` - click resolution and marker placement

pub mod coordinates;
pub mod rules;
pub mod selection;

pub use rules::{BoardStore, Cell};
pub use selection::{ClickOutcome, Selection};

//! Editing module - the cell edit state machine and input parsing.

mod editing_model;
mod editing_service;

// Re-export the public interface
pub use editing_model::{CellRef, EditOutcome, EditSession, EditState, RedrawScope};
pub use editing_service::{parse_cell_input, EditRegistry};

//! Edit session models.

use serde::{Deserialize, Serialize};

use crate::fields::FieldId;
use crate::projection::ProjectionResult;

/// One grid cell, as the presentation layer addresses it (view fields
/// included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRef {
    pub field: FieldId,
    pub period: usize,
}

impl CellRef {
    pub fn new(field: FieldId, period: usize) -> Self {
        CellRef { field, period }
    }
}

/// Lifecycle of one in-progress cell edit.
///
/// LiveUpdating is re-entered on every accepted keystroke; the terminal
/// states immediately return the cell to Idle (the session is discarded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Editing,
    LiveUpdating,
    Committed,
    Cancelled,
}

/// Ephemeral record of one open editor. Holds everything needed to revert
/// the canonical cell to its pre-edit state.
#[derive(Debug, Clone)]
pub struct EditSession {
    /// The cell as activated (may be a coupled view).
    pub cell: CellRef,
    /// The canonical storage cell the edit writes through to.
    pub canonical: CellRef,
    pub(crate) original_value: f64,
    pub(crate) original_override: bool,
    pub(crate) state: EditState,
}

/// Which cells the presentation layer should redraw after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawScope {
    /// Push fresh values everywhere except the cell still being edited (its
    /// raw text box is left untouched).
    AllExcept(CellRef),
    /// Full redisplay, including the just-closed cell as static text.
    Full,
}

/// Result of a commit/cancel/live-update step.
#[derive(Debug)]
pub struct EditOutcome {
    /// False when the final text failed to parse and the cell reverted.
    pub applied: bool,
    pub result: ProjectionResult,
    pub redraw: RedrawScope,
}

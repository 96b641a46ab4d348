//! Core error types for the valuation engine.
//!
//! Transport-specific errors (reqwest, HTTP statuses) are converted into
//! [`RecalcError`] by the recalc-client crate so this crate stays
//! transport-agnostic.

use thiserror::Error;

use crate::fields::{FieldId, ModelVariant};

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the valuation engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Field {field:?} does not exist in model variant {variant:?}")]
    UnknownField {
        variant: ModelVariant,
        field: FieldId,
    },

    #[error("Period {period} out of range for field {field:?} (length {len})")]
    PeriodOutOfRange {
        field: FieldId,
        period: usize,
        len: usize,
    },

    #[error("Edit session error: {0}")]
    Edit(#[from] EditError),

    #[error("Recalculation failed: {0}")]
    Recalculation(#[from] RecalcError),

    #[error("Model variant {0:?} is not available for this analysis")]
    ModelUnavailable(ModelVariant),
}

/// Validation errors for server payloads and assumption shapes.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field '{0}' is missing from the payload")]
    MissingField(String),

    #[error("Field '{field}' has {actual} values, expected {expected}")]
    ShapeMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Unexpected field '{0}' in payload (coupled views are not stored)")]
    UnexpectedField(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Errors from the cell edit state machine.
#[derive(Error, Debug)]
pub enum EditError {
    /// The canonical storage cell already has an open editor. Two coupled
    /// views of the same stored value cannot be edited at once.
    #[error("Cell {field:?}[{period}] already has an open editor")]
    CellBusy { field: FieldId, period: usize },

    #[error("No open editor for cell {field:?}[{period}]")]
    NoOpenEditor { field: FieldId, period: usize },
}

/// Errors from the authoritative recalculation service.
///
/// These are surfaced to the user as a blocking notification; they never
/// mutate stored assumptions or currently displayed outputs.
#[derive(Error, Debug, Clone)]
pub enum RecalcError {
    /// The request never produced a response (connection, timeout, DNS).
    #[error("Recalculation request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status and a human-readable
    /// message.
    #[error("Recalculation service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// The service answered successfully but the body could not be decoded.
    #[error("Invalid recalculation response: {0}")]
    InvalidResponse(String),

    /// A recalculation for this session is already in flight.
    #[error("A recalculation is already in flight")]
    InFlight,
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

//! Intrinsica Core Crate
//!
//! Interactive company-valuation engine: per-period assumption grids, four
//! projection model variants, cell edit sessions, and reconciliation against
//! an authoritative recalculation service.
//!
//! # Overview
//!
//! The core crate supports:
//! - Four valuation model variants: FCF-margin DCF, earnings/P-E-exit DCF,
//!   Gordon Growth, and two-stage DDM
//! - Per-period assumption storage with coupled field views and per-cell
//!   override tracking
//! - Synchronous local recomputation on every applied edit
//! - Atomic reset to the server-provided defaults and baseline outputs
//! - Asynchronous reconciliation with stale-response discard
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  AnalysisPayload | --> | ValuationSession |  (one per available variant)
//! +------------------+     +------------------+
//!                                  |
//!                    +-------------+-------------+
//!                    v                           v
//!           +------------------+       +------------------+
//!           | AssumptionVector |       |   EditRegistry   |  (open editors)
//!           +------------------+       +------------------+
//!                    |
//!                    v
//!           +------------------+       +---------------------------+
//!           |  model_for(...)  | <---- | ReconciliationCoordinator |
//!           +------------------+       +---------------------------+
//!                    |
//!                    v
//!           +------------------+
//!           | ProjectionResult |  (rows + valuation outputs)
//!           +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`ValuationSession`] - Owns one assumption vector and displayed outputs
//! - [`AssumptionVector`] - Per-period values, coupled views, override mask
//! - [`FieldId`] / [`ModelVariant`] - Field and variant identities
//! - [`EditRegistry`] - Open cell editors, keyed by canonical storage cell
//! - [`ReconciliationCoordinator`] - Authoritative recalculation round trips

pub mod analysis;
pub mod assumptions;
pub mod baseline;
pub mod constants;
pub mod editing;
pub mod errors;
pub mod fields;
pub mod projection;
pub mod reconciliation;
pub mod session;

// Re-export the error types
pub use errors::{EditError, Error, RecalcError, Result, ValidationError};

// Re-export field and schema types
pub use fields::{field_spec, schema, Coupling, FieldId, FieldSpec, FieldStorage, InputKind, ModelVariant};

// Re-export assumption storage
pub use assumptions::{AssumptionVector, DefaultsSnapshot};

// Re-export projection types
pub use projection::{
    model_for, FixedInputs, ProjectionResult, ProjectionRow, ValuationModelTrait,
    ValuationOutputs,
};

// Re-export session types
pub use analysis::{AnalysisPayload, ModelPayload};
pub use session::{build_sessions, ValuationSession};

// Re-export editing types
pub use editing::{parse_cell_input, CellRef, EditOutcome, EditRegistry, EditState, RedrawScope};

// Re-export reconciliation types
pub use reconciliation::{
    RecalcRequest, RecalcStatus, RecalcTicket, ReconciliationCoordinator,
    RecalculationClientTrait,
};

// Re-export baseline derivation
pub use baseline::{
    derive_dividend_defaults, derive_earnings_dcf_defaults, CapmRates, DividendDefaults,
    DividendYear, EarningsDcfDefaults, GrowthPolicy, YearData,
};

//! Wire models and tickets for authoritative recalculation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fields::{FieldId, ModelVariant};
use crate::projection::FixedInputs;

/// Full current assumption set plus fixed inputs, keyed by ticker and
/// variant - the agreed basis for the authoritative numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecalcRequest {
    pub ticker: String,
    pub variant: ModelVariant,
    pub assumptions: BTreeMap<FieldId, Vec<f64>>,
    pub fixed: FixedInputs,
}

/// Handle for one in-flight recalculation.
///
/// Captures the session revision at submit time so a response that lands
/// after further local edits can be recognized as stale and discarded.
#[derive(Debug)]
pub struct RecalcTicket {
    pub(crate) token: u64,
    pub(crate) revision: u64,
    pub request: RecalcRequest,
}

/// How a completed recalculation was merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecalcStatus {
    /// Authoritative outputs overwrote the displayed valuation outputs.
    Applied,
    /// The session moved on while the request was in flight; the response
    /// was discarded and nothing changed.
    Stale,
}

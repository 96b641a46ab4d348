//! Server analysis payload - consumed once per ticker analysis.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::baseline::{DividendYear, YearData};
use crate::fields::{FieldId, ModelVariant};
use crate::projection::{FixedInputs, ValuationOutputs};

/// One backend analysis for one ticker: per-variant model payloads plus the
/// timestamp the numbers were produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    pub ticker: String,
    pub as_of: DateTime<Utc>,
    pub models: Vec<ModelPayload>,
}

/// One variant's slice of the analysis payload.
///
/// `available` is false when the model does not apply (no dividends, no live
/// price); nothing is constructed for such variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPayload {
    pub variant: ModelVariant,
    pub available: bool,
    /// Historical actuals the defaults were derived from, oldest to newest.
    /// Display data for the DCF variants; empty for the dividend models.
    #[serde(default)]
    pub actuals: Vec<YearData>,
    /// Annual dividend history, oldest to newest; empty for the DCF variants.
    #[serde(default)]
    pub dividend_history: Vec<DividendYear>,
    #[serde(default)]
    pub defaults: BTreeMap<FieldId, Vec<f64>>,
    #[serde(default)]
    pub fixed: FixedInputs,
    /// The server's own valuation outputs for the default assumptions -
    /// redisplayed verbatim after a local reset.
    #[serde(default)]
    pub baseline: ValuationOutputs,
}

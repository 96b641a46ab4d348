//! Projection result models - ephemeral, derived on every query.

use serde::{Deserialize, Serialize};

/// Scalars the engines read but the grid never edits.
///
/// Exclusively owned by the `ValuationSession`; the discount rate is the
/// CAPM cost of equity or WACC depending on variant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedInputs {
    pub discount_rate: f64,
    pub base_revenue: f64,
    pub base_diluted_shares: f64,
    pub interest_expense: f64,
    pub net_cash: f64,
    pub current_price: f64,
    pub latest_annual_dps: f64,
    /// Perpetuity growth for the FCF-margin terminal value.
    pub terminal_growth: f64,
}

/// One projected period. Variants populate the columns they produce and
/// leave the rest `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRow {
    pub period: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_profit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_expenses: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretax_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diluted_shares: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capex: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub da: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_cash_flow: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub present_value: Option<f64>,
}

/// Aggregate valuation outputs. This is the only portion of a displayed
/// result an authoritative recalculation may overwrite.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationOutputs {
    pub terminal_value: f64,
    pub pv_explicit: f64,
    pub pv_terminal_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enterprise_value: Option<f64>,
    pub equity_value: f64,
    pub intrinsic_value: f64,
    /// Fraction vs. current price; positive = upside.
    pub upside_downside: f64,
}

/// Pure function of (AssumptionVector, FixedInputs); no hidden state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub rows: Vec<ProjectionRow>,
    pub outputs: ValuationOutputs,
}

/// Discount `amount` back `periods` periods at `rate`.
///
/// A non-positive discount factor yields 0 by the degenerate-input policy,
/// never NaN or infinity.
pub(crate) fn present_value(amount: f64, rate: f64, periods: usize) -> f64 {
    let factor = (1.0 + rate).powi(periods as i32);
    if factor > 0.0 {
        amount / factor
    } else {
        0.0
    }
}

/// Ratio with the degenerate-input policy: a non-positive denominator
/// yields 0.
pub(crate) fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Upside fraction vs. the current market price; 0 when the price is
/// non-positive.
pub(crate) fn upside_vs_price(intrinsic_value: f64, current_price: f64) -> f64 {
    if current_price > 0.0 {
        (intrinsic_value - current_price) / current_price
    } else {
        0.0
    }
}

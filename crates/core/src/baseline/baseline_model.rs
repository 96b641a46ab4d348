//! Historical inputs and derived default assumptions.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BETA, FALLBACK_EQUITY_RISK_PREMIUM, FALLBACK_RISK_FREE_RATE};

/// One historical fiscal year of income-statement, cash-flow, and
/// balance-sheet figures, normalized so costs are positive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearData {
    pub year: i32,
    pub revenue: f64,
    pub operating_income: f64,
    pub interest_expense: f64,
    pub pretax_income: f64,
    pub tax_expense: f64,
    pub net_income: f64,
    pub diluted_shares: f64,
    pub eps: f64,
    pub capex: f64,
    pub da: f64,
    pub fcf: f64,
    /// Y/Y rate; `None` for the oldest year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_growth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares_growth: Option<f64>,
    pub cash: f64,
    pub long_term_debt: f64,
    pub short_term_debt: f64,
    /// long_term_debt + short_term_debt - cash.
    pub net_debt: f64,
}

/// One calendar year of aggregated dividend payments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendYear {
    pub year: i32,
    /// Total dividends per share paid during the year.
    pub annual_dps: f64,
    /// dps / eps; `None` when EPS is unavailable or non-positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_ratio: Option<f64>,
    /// Y/Y rate; `None` for the oldest year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dps_growth: Option<f64>,
}

/// Policy knobs for the recency-weighted growth average. Sector rule sets
/// supply these; the default matches the general-market rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPolicy {
    pub floor: f64,
    pub cap: f64,
    /// Multiplier applied to the newest observation's weight.
    pub recency_bias: f64,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        GrowthPolicy {
            floor: 0.03,
            cap: 0.40,
            recency_bias: 1.0,
        }
    }
}

/// Resolved CAPM inputs and the resulting cost of equity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapmRates {
    pub risk_free_rate: f64,
    pub equity_risk_premium: f64,
    pub beta: f64,
    pub cost_of_equity: f64,
}

impl CapmRates {
    /// `Re = Rf + β × ERP`, substituting fallback rates for anything the
    /// market-data source failed to supply.
    pub fn resolve(risk_free_rate: Option<f64>, equity_risk_premium: Option<f64>, beta: f64) -> Self {
        let risk_free_rate = risk_free_rate.unwrap_or(FALLBACK_RISK_FREE_RATE);
        let equity_risk_premium = equity_risk_premium.unwrap_or(FALLBACK_EQUITY_RISK_PREMIUM);
        CapmRates {
            risk_free_rate,
            equity_risk_premium,
            beta,
            cost_of_equity: risk_free_rate + beta * equity_risk_premium,
        }
    }
}

/// Beta preference order: company profile, then quote, then the market
/// default. Non-positive values count as missing.
pub fn resolve_beta(profile_beta: f64, quote_beta: f64) -> f64 {
    if profile_beta > 0.0 {
        profile_beta
    } else if quote_beta > 0.0 {
        quote_beta
    } else {
        DEFAULT_BETA
    }
}

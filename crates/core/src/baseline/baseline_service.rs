//! Derivation of default assumption grids from historical actuals.
//!
//! Mirrors what the analysis backend sends in the payload, so a locally
//! derived baseline and a server-provided one agree. Per-period defaults are
//! uniform: every projection period starts from the same base rate.

use std::collections::BTreeMap;

use log::debug;

use crate::constants::{
    DEFAULT_EXIT_PE, DEFAULT_STAGE_ONE_YEARS, DPS_GROWTH_OUTLIER_HIGH, DPS_GROWTH_OUTLIER_LOW,
    FALLBACK_TAX_RATE, GGM_GROWTH_MARGIN, MAX_EFFECTIVE_TAX_RATE, PROJECTION_PERIODS,
    SHARES_GROWTH_CLAMP, STAGE_ONE_GROWTH_MAX, STAGE_ONE_GROWTH_MIN, TERMINAL_GROWTH_CEILING,
    TERMINAL_GROWTH_RE_MARGIN,
};
use crate::errors::{Result, ValidationError};
use crate::fields::FieldId;
use crate::projection::FixedInputs;

use super::baseline_model::{CapmRates, DividendYear, GrowthPolicy, YearData};

/// Fill y/y revenue and share-count growth on an oldest-to-newest actuals
/// list. The oldest year stays `None`.
pub fn fill_growth_rates(actuals: &mut [YearData]) {
    for i in 1..actuals.len() {
        let (prev_revenue, prev_shares) = {
            let prev = &actuals[i - 1];
            (prev.revenue, prev.diluted_shares)
        };
        let curr = &mut actuals[i];
        if prev_revenue > 0.0 {
            curr.revenue_growth = Some((curr.revenue - prev_revenue) / prev_revenue);
        }
        if prev_shares > 0.0 {
            curr.shares_growth = Some((curr.diluted_shares - prev_shares) / prev_shares);
        }
    }
}

/// Fill y/y DPS growth on an oldest-to-newest dividend history.
pub fn fill_dps_growth(history: &mut [DividendYear]) {
    for i in 1..history.len() {
        let prev_dps = history[i - 1].annual_dps;
        if prev_dps > 0.0 {
            let curr = &mut history[i];
            curr.dps_growth = Some((curr.annual_dps - prev_dps) / prev_dps);
        }
    }
}

/// Recency-weighted average of growth observations, newest first, clamped to
/// the policy band. Weights decay linearly with age; the newest observation's
/// weight is scaled by the recency bias.
pub fn weighted_growth(rates_newest_first: &[f64], policy: &GrowthPolicy) -> f64 {
    if rates_newest_first.is_empty() {
        return policy.floor;
    }
    let n = rates_newest_first.len();
    let mut weights: Vec<f64> = (0..n).map(|i| (n - i) as f64).collect();
    if policy.recency_bias != 1.0 {
        weights[0] *= policy.recency_bias;
    }
    let total: f64 = weights.iter().sum();
    let raw: f64 = weights
        .iter()
        .zip(rates_newest_first)
        .map(|(w, g)| w * g)
        .sum::<f64>()
        / total;
    raw.clamp(policy.floor, policy.cap)
}

/// Recency-weighted average with no band, used for dividend growth where the
/// outlier filter has already run. Returns 0 on empty input.
fn recency_weighted(rates_newest_first: &[f64]) -> f64 {
    if rates_newest_first.is_empty() {
        return 0.0;
    }
    let n = rates_newest_first.len();
    let weights: Vec<f64> = (0..n).map(|i| (n - i) as f64).collect();
    let total: f64 = weights.iter().sum();
    weights
        .iter()
        .zip(rates_newest_first)
        .map(|(w, g)| w * g)
        .sum::<f64>()
        / total
}

/// Base assumptions for the earnings/P-E-exit DCF, derived from the most
/// recent actual and the growth history.
#[derive(Debug, Clone, Copy)]
pub struct EarningsDcfDefaults {
    pub base_revenue_growth: f64,
    pub base_op_margin: f64,
    pub base_interest_expense: f64,
    pub base_tax_rate: f64,
    pub base_capex_pct: f64,
    pub base_da_pct: f64,
    pub base_shares_growth: f64,
    pub exit_pe_multiple: f64,
    pub base_diluted_shares: f64,
}

impl EarningsDcfDefaults {
    /// Uniform per-period default grid for the earnings-exit variant.
    pub fn field_defaults(&self) -> BTreeMap<FieldId, Vec<f64>> {
        let mut defaults = BTreeMap::new();
        defaults.insert(
            FieldId::RevenueGrowth,
            vec![self.base_revenue_growth; PROJECTION_PERIODS],
        );
        defaults.insert(
            FieldId::OperatingMargin,
            vec![self.base_op_margin; PROJECTION_PERIODS],
        );
        defaults.insert(FieldId::TaxRate, vec![self.base_tax_rate; PROJECTION_PERIODS]);
        defaults.insert(
            FieldId::SharesGrowth,
            vec![self.base_shares_growth; PROJECTION_PERIODS],
        );
        defaults.insert(FieldId::CapexPct, vec![self.base_capex_pct; PROJECTION_PERIODS]);
        defaults.insert(FieldId::DaPct, vec![self.base_da_pct; PROJECTION_PERIODS]);
        defaults.insert(FieldId::ExitPeMultiple, vec![self.exit_pe_multiple]);
        defaults
    }

    /// Fixed inputs for the earnings-exit variant from the latest actual.
    pub fn fixed_inputs(&self, last: &YearData, current_price: f64) -> FixedInputs {
        FixedInputs {
            base_revenue: last.revenue,
            base_diluted_shares: self.base_diluted_shares,
            interest_expense: self.base_interest_expense,
            net_cash: -last.net_debt,
            current_price,
            ..Default::default()
        }
    }
}

/// Derive earnings-DCF defaults from at least two historical actuals,
/// oldest to newest, with growth rates already filled.
pub fn derive_earnings_dcf_defaults(
    actuals: &[YearData],
    policy: &GrowthPolicy,
) -> Result<EarningsDcfDefaults> {
    let last = match actuals.last() {
        Some(last) if actuals.len() >= 2 => last,
        _ => {
            return Err(ValidationError::InvalidInput(format!(
                "insufficient historical data: {} actuals, need at least 2",
                actuals.len()
            ))
            .into())
        }
    };

    let revenue_growths_newest_first: Vec<f64> = actuals
        .iter()
        .rev()
        .filter_map(|a| a.revenue_growth)
        .collect();
    let base_revenue_growth = weighted_growth(&revenue_growths_newest_first, policy);

    let base_op_margin = if last.revenue > 0.0 {
        last.operating_income / last.revenue
    } else {
        0.15
    };

    let base_tax_rate = if last.pretax_income > 0.0 && last.tax_expense >= 0.0 {
        (last.tax_expense / last.pretax_income).min(MAX_EFFECTIVE_TAX_RATE)
    } else {
        FALLBACK_TAX_RATE
    };

    let base_capex_pct = if last.revenue > 0.0 {
        last.capex / last.revenue
    } else {
        0.05
    };
    let base_da_pct = if last.revenue > 0.0 {
        last.da / last.revenue
    } else {
        0.03
    };

    let shares_growths: Vec<f64> = actuals.iter().filter_map(|a| a.shares_growth).collect();
    let base_shares_growth = if shares_growths.is_empty() {
        0.0
    } else {
        (shares_growths.iter().sum::<f64>() / shares_growths.len() as f64)
            .clamp(-SHARES_GROWTH_CLAMP, SHARES_GROWTH_CLAMP)
    };

    let defaults = EarningsDcfDefaults {
        base_revenue_growth,
        base_op_margin,
        base_interest_expense: last.interest_expense,
        base_tax_rate,
        base_capex_pct,
        base_da_pct,
        base_shares_growth,
        exit_pe_multiple: DEFAULT_EXIT_PE,
        base_diluted_shares: last.diluted_shares,
    };
    debug!(
        "Derived earnings DCF defaults: growth={:.4} margin={:.4} tax={:.4}",
        defaults.base_revenue_growth, defaults.base_op_margin, defaults.base_tax_rate
    );
    Ok(defaults)
}

/// Base assumptions for the dividend models.
#[derive(Debug, Clone, Copy)]
pub struct DividendDefaults {
    pub latest_annual_dps: f64,
    pub avg_dps_growth: f64,
    pub weighted_dps_growth: f64,
    pub avg_payout_ratio: f64,
    /// Gordon Growth g, held below Re.
    pub ggm_growth: f64,
    /// Two-stage g1, clamped to the high-growth band.
    pub stage_one_growth: f64,
    pub stage_one_years: u32,
    /// Two-stage g2, capped at ~3% and below Re.
    pub terminal_growth: f64,
}

impl DividendDefaults {
    pub fn current_yield(&self, current_price: f64) -> f64 {
        if current_price > 0.0 {
            self.latest_annual_dps / current_price
        } else {
            0.0
        }
    }

    pub fn ggm_field_defaults(&self) -> BTreeMap<FieldId, Vec<f64>> {
        let mut defaults = BTreeMap::new();
        defaults.insert(FieldId::DividendGrowth, vec![self.ggm_growth]);
        defaults
    }

    pub fn two_stage_field_defaults(&self) -> BTreeMap<FieldId, Vec<f64>> {
        let mut defaults = BTreeMap::new();
        defaults.insert(FieldId::StageOneGrowth, vec![self.stage_one_growth]);
        defaults.insert(FieldId::StageOneYears, vec![self.stage_one_years as f64]);
        defaults.insert(FieldId::TerminalGrowth, vec![self.terminal_growth]);
        defaults
    }
}

/// Derive dividend-model defaults from a non-empty dividend history, oldest
/// to newest, with DPS growth already filled.
///
/// Growth observations outside the outlier band are discarded before
/// averaging; an empty survivor set falls back to 2%.
pub fn derive_dividend_defaults(
    history: &[DividendYear],
    capm: &CapmRates,
) -> Result<DividendDefaults> {
    let latest = history.last().ok_or_else(|| {
        ValidationError::InvalidInput("no dividend history; dividend models unavailable".to_string())
    })?;

    let clean: Vec<f64> = history
        .iter()
        .filter_map(|h| h.dps_growth)
        .filter(|g| (DPS_GROWTH_OUTLIER_LOW..=DPS_GROWTH_OUTLIER_HIGH).contains(g))
        .collect();

    let avg_dps_growth = if clean.is_empty() {
        0.02
    } else {
        clean.iter().sum::<f64>() / clean.len() as f64
    };
    let weighted_dps_growth = if clean.is_empty() {
        0.02
    } else {
        let newest_first: Vec<f64> = clean.iter().rev().copied().collect();
        recency_weighted(&newest_first)
    };

    let payouts: Vec<f64> = history.iter().filter_map(|h| h.payout_ratio).collect();
    let avg_payout_ratio = if payouts.is_empty() {
        0.0
    } else {
        payouts.iter().sum::<f64>() / payouts.len() as f64
    };

    let re = capm.cost_of_equity;
    let ggm_growth = weighted_dps_growth.min(re - GGM_GROWTH_MARGIN).max(0.0);
    let stage_one_growth = weighted_dps_growth.clamp(STAGE_ONE_GROWTH_MIN, STAGE_ONE_GROWTH_MAX);
    let terminal_growth = TERMINAL_GROWTH_CEILING
        .min(re - TERMINAL_GROWTH_RE_MARGIN)
        .max(0.0);

    let defaults = DividendDefaults {
        latest_annual_dps: latest.annual_dps,
        avg_dps_growth,
        weighted_dps_growth,
        avg_payout_ratio,
        ggm_growth,
        stage_one_growth,
        stage_one_years: DEFAULT_STAGE_ONE_YEARS,
        terminal_growth,
    };
    debug!(
        "Derived dividend defaults: dps={:.4} g={:.4} ggm_g={:.4} g2={:.4}",
        defaults.latest_annual_dps,
        defaults.weighted_dps_growth,
        defaults.ggm_growth,
        defaults.terminal_growth
    );
    Ok(defaults)
}

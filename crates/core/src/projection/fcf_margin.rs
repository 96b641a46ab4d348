//! Revenue-driven DCF where free cash flow is an exogenous margin assumption.
//!
//! The income lines (gross profit, opex, EBIT, tax) are projected for display
//! but FCF is `revenue x fcfMargin`, not derived from them. Terminal value is
//! a perpetuity on final-period FCF using the fixed WACC and terminal growth,
//! and the bridge runs enterprise -> equity via net cash.

use crate::assumptions::AssumptionVector;
use crate::errors::Result;
use crate::fields::{FieldId, ModelVariant};

use super::projection_model::{
    present_value, safe_ratio, upside_vs_price, FixedInputs, ProjectionResult, ProjectionRow,
    ValuationOutputs,
};
use super::projection_traits::ValuationModelTrait;

pub struct FcfMarginDcfModel;

impl ValuationModelTrait for FcfMarginDcfModel {
    fn variant(&self) -> ModelVariant {
        ModelVariant::FcfMarginDcf
    }

    fn compute(
        &self,
        assumptions: &AssumptionVector,
        fixed: &FixedInputs,
    ) -> Result<ProjectionResult> {
        let periods = assumptions.period_count();
        let rate = fixed.discount_rate;

        let mut rows = Vec::with_capacity(periods);
        let mut prev_revenue = fixed.base_revenue;
        let mut pv_explicit = 0.0;
        let mut last_fcf = 0.0;

        for t in 1..=periods {
            let i = t - 1;
            let growth = assumptions.get(FieldId::RevenueGrowth, i)?;
            let gross_margin = assumptions.get(FieldId::GrossMargin, i)?;
            let opex_pct = assumptions.get(FieldId::OpexPct, i)?;
            let tax_rate = assumptions.get(FieldId::TaxRate, i)?;
            let fcf_margin = assumptions.get(FieldId::FcfMargin, i)?;

            let revenue = prev_revenue * (1.0 + growth);
            let gross_profit = revenue * gross_margin;
            let opex = revenue * opex_pct;
            let ebit = gross_profit - opex;
            let tax = ebit.max(0.0) * tax_rate;
            let fcf = revenue * fcf_margin;
            let pv = present_value(fcf, rate, t);
            pv_explicit += pv;

            rows.push(ProjectionRow {
                period: t,
                revenue: Some(revenue),
                gross_profit: Some(gross_profit),
                operating_expenses: Some(opex),
                ebit: Some(ebit),
                tax: Some(tax),
                free_cash_flow: Some(fcf),
                present_value: Some(pv),
                ..Default::default()
            });

            prev_revenue = revenue;
            last_fcf = fcf;
        }

        let growth = fixed.terminal_growth;
        let terminal_value = if rate > growth && last_fcf > 0.0 {
            last_fcf * (1.0 + growth) / (rate - growth)
        } else {
            0.0
        };
        let pv_terminal_value = present_value(terminal_value, rate, periods);
        let enterprise_value = pv_explicit + pv_terminal_value;
        let equity_value = enterprise_value + fixed.net_cash;
        let intrinsic_value = safe_ratio(equity_value, fixed.base_diluted_shares);
        let upside_downside = upside_vs_price(intrinsic_value, fixed.current_price);

        Ok(ProjectionResult {
            rows,
            outputs: ValuationOutputs {
                terminal_value,
                pv_explicit,
                pv_terminal_value,
                enterprise_value: Some(enterprise_value),
                equity_value,
                intrinsic_value,
                upside_downside,
            },
        })
    }
}

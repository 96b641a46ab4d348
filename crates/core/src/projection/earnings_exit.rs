//! Net-income DCF with a P/E exit multiple terminal value.
//!
//! Equity-basis walk: operating income less a constant interest expense, tax
//! only on positive pretax income, FCF = net income + D&A - capex. Terminal
//! value is final-period net income times the exit P/E; intrinsic value is
//! equity value over *base* diluted shares.

use crate::assumptions::AssumptionVector;
use crate::errors::Result;
use crate::fields::{FieldId, ModelVariant};

use super::projection_model::{
    present_value, safe_ratio, upside_vs_price, FixedInputs, ProjectionResult, ProjectionRow,
    ValuationOutputs,
};
use super::projection_traits::ValuationModelTrait;

pub struct EarningsExitDcfModel;

impl ValuationModelTrait for EarningsExitDcfModel {
    fn variant(&self) -> ModelVariant {
        ModelVariant::EarningsExitDcf
    }

    fn compute(
        &self,
        assumptions: &AssumptionVector,
        fixed: &FixedInputs,
    ) -> Result<ProjectionResult> {
        let periods = assumptions.period_count();
        let rate = fixed.discount_rate;
        let exit_pe = assumptions.get(FieldId::ExitPeMultiple, 0)?;

        let mut rows = Vec::with_capacity(periods);
        let mut prev_revenue = fixed.base_revenue;
        let mut prev_shares = fixed.base_diluted_shares;
        let mut pv_explicit = 0.0;
        let mut last_net_income = 0.0;

        for t in 1..=periods {
            let i = t - 1;
            let growth = assumptions.get(FieldId::RevenueGrowth, i)?;
            let op_margin = assumptions.get(FieldId::OperatingMargin, i)?;
            let tax_rate = assumptions.get(FieldId::TaxRate, i)?;
            let shares_growth = assumptions.get(FieldId::SharesGrowth, i)?;
            let capex_pct = assumptions.get(FieldId::CapexPct, i)?;
            let da_pct = assumptions.get(FieldId::DaPct, i)?;

            let revenue = prev_revenue * (1.0 + growth);
            let operating_income = revenue * op_margin;
            let pretax_income = operating_income - fixed.interest_expense;
            let tax = pretax_income.max(0.0) * tax_rate;
            let net_income = pretax_income - tax;
            let diluted_shares = prev_shares * (1.0 + shares_growth);
            let eps = safe_ratio(net_income, diluted_shares);
            let capex = revenue * capex_pct;
            let da = revenue * da_pct;
            let free_cash_flow = net_income + da - capex;
            let pv = present_value(free_cash_flow, rate, t);
            pv_explicit += pv;

            rows.push(ProjectionRow {
                period: t,
                revenue: Some(revenue),
                operating_income: Some(operating_income),
                pretax_income: Some(pretax_income),
                tax: Some(tax),
                net_income: Some(net_income),
                diluted_shares: Some(diluted_shares),
                eps: Some(eps),
                capex: Some(capex),
                da: Some(da),
                free_cash_flow: Some(free_cash_flow),
                present_value: Some(pv),
                ..Default::default()
            });

            prev_revenue = revenue;
            prev_shares = diluted_shares;
            last_net_income = net_income;
        }

        let terminal_value = last_net_income * exit_pe;
        let pv_terminal_value = present_value(terminal_value, rate, periods);
        let equity_value = pv_explicit + pv_terminal_value;
        let intrinsic_value = safe_ratio(equity_value, fixed.base_diluted_shares);
        let upside_downside = upside_vs_price(intrinsic_value, fixed.current_price);

        Ok(ProjectionResult {
            rows,
            outputs: ValuationOutputs {
                terminal_value,
                pv_explicit,
                pv_terminal_value,
                enterprise_value: None,
                equity_value,
                intrinsic_value,
                upside_downside,
            },
        })
    }
}

//! Two-stage dividend discount model.
//!
//! Stage 1 compounds the latest annual DPS at g1 for N periods, discounting
//! each; stage 2 is a Gordon Growth terminal value at g2, discounted back N
//! periods. If Re <= g2 the terminal value is 0 and the intrinsic value is
//! stage 1 alone.

use crate::assumptions::AssumptionVector;
use crate::errors::Result;
use crate::fields::{FieldId, ModelVariant};

use super::projection_model::{
    present_value, FixedInputs, ProjectionResult, ProjectionRow, ValuationOutputs,
};
use super::projection_traits::ValuationModelTrait;

pub struct TwoStageDdmModel;

impl ValuationModelTrait for TwoStageDdmModel {
    fn variant(&self) -> ModelVariant {
        ModelVariant::TwoStageDdm
    }

    fn compute(
        &self,
        assumptions: &AssumptionVector,
        fixed: &FixedInputs,
    ) -> Result<ProjectionResult> {
        let periods = assumptions.period_count();
        let g1 = assumptions.get(FieldId::StageOneGrowth, 0)?;
        let g2 = assumptions.get(FieldId::TerminalGrowth, 0)?;
        let rate = fixed.discount_rate;

        let mut rows = Vec::with_capacity(periods);
        let mut dividend = fixed.latest_annual_dps;
        let mut pv_explicit = 0.0;

        for t in 1..=periods {
            dividend *= 1.0 + g1;
            let pv = present_value(dividend, rate, t);
            pv_explicit += pv;
            rows.push(ProjectionRow {
                period: t,
                dividend: Some(dividend),
                present_value: Some(pv),
                ..Default::default()
            });
        }

        let terminal_dividend = dividend * (1.0 + g2);
        let terminal_value = if rate > g2 {
            terminal_dividend / (rate - g2)
        } else {
            0.0
        };
        let pv_terminal_value = present_value(terminal_value, rate, periods);
        let intrinsic_value = pv_explicit + pv_terminal_value;
        let upside_downside = if fixed.current_price > 0.0 && intrinsic_value > 0.0 {
            (intrinsic_value - fixed.current_price) / fixed.current_price
        } else {
            0.0
        };

        Ok(ProjectionResult {
            rows,
            outputs: ValuationOutputs {
                terminal_value,
                pv_explicit,
                pv_terminal_value,
                enterprise_value: None,
                equity_value: 0.0,
                intrinsic_value,
                upside_downside,
            },
        })
    }
}

//! Gordon Growth (single-stage perpetuity) dividend model: P = D1 / (Re - g).

use crate::assumptions::AssumptionVector;
use crate::errors::Result;
use crate::fields::{FieldId, ModelVariant};

use super::projection_model::{FixedInputs, ProjectionResult, ProjectionRow, ValuationOutputs};
use super::projection_traits::ValuationModelTrait;

pub struct GordonGrowthModel;

impl ValuationModelTrait for GordonGrowthModel {
    fn variant(&self) -> ModelVariant {
        ModelVariant::GordonGrowth
    }

    fn compute(
        &self,
        assumptions: &AssumptionVector,
        fixed: &FixedInputs,
    ) -> Result<ProjectionResult> {
        let growth = assumptions.get(FieldId::DividendGrowth, 0)?;
        let rate = fixed.discount_rate;
        let d1 = fixed.latest_annual_dps * (1.0 + growth);

        let intrinsic_value = if rate > growth && d1 > 0.0 {
            d1 / (rate - growth)
        } else {
            0.0
        };
        let upside_downside = if fixed.current_price > 0.0 && intrinsic_value > 0.0 {
            (intrinsic_value - fixed.current_price) / fixed.current_price
        } else {
            0.0
        };

        let rows = vec![ProjectionRow {
            period: 1,
            dividend: Some(d1),
            ..Default::default()
        }];

        Ok(ProjectionResult {
            rows,
            outputs: ValuationOutputs {
                terminal_value: 0.0,
                pv_explicit: 0.0,
                pv_terminal_value: 0.0,
                enterprise_value: None,
                equity_value: 0.0,
                intrinsic_value,
                upside_downside,
            },
        })
    }
}

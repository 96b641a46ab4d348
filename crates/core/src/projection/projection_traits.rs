//! Projection engine trait and variant dispatch.

use crate::assumptions::AssumptionVector;
use crate::errors::Result;
use crate::fields::{schema, FieldSpec, ModelVariant};

use super::earnings_exit::EarningsExitDcfModel;
use super::fcf_margin::FcfMarginDcfModel;
use super::gordon_growth::GordonGrowthModel;
use super::projection_model::{FixedInputs, ProjectionResult};
use super::two_stage::TwoStageDdmModel;

/// A valuation model variant: a period-walk plus a terminal-value rule.
///
/// Implementations are pure: `compute` derives a fresh result from the
/// assumption vector and fixed inputs on every call. The edit machinery,
/// override tracking, and reconciliation are variant-agnostic; adding a
/// variant means implementing this trait and supplying a field schema.
pub trait ValuationModelTrait: Send + Sync {
    fn variant(&self) -> ModelVariant;

    fn schema(&self) -> &'static [FieldSpec] {
        schema(self.variant())
    }

    fn compute(
        &self,
        assumptions: &AssumptionVector,
        fixed: &FixedInputs,
    ) -> Result<ProjectionResult>;
}

/// Dispatch table from variant to engine.
pub fn model_for(variant: ModelVariant) -> &'static dyn ValuationModelTrait {
    match variant {
        ModelVariant::FcfMarginDcf => &FcfMarginDcfModel,
        ModelVariant::EarningsExitDcf => &EarningsExitDcfModel,
        ModelVariant::GordonGrowth => &GordonGrowthModel,
        ModelVariant::TwoStageDdm => &TwoStageDdmModel,
    }
}

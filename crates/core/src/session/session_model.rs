//! The per-analysis valuation session aggregate.

use log::debug;
use uuid::Uuid;

use crate::assumptions::{AssumptionVector, DefaultsSnapshot};
use crate::errors::Result;
use crate::fields::{FieldId, ModelVariant};
use crate::projection::{model_for, FixedInputs, ProjectionResult, ValuationOutputs};

/// Owns one assumption vector, its defaults snapshot, fixed inputs, and the
/// variant identity for one ticker.
///
/// Created when an analysis completes and replaced wholesale on the next one.
/// There is no module-level state: whoever needs the session is handed `&mut`.
#[derive(Debug, Clone)]
pub struct ValuationSession {
    id: Uuid,
    ticker: String,
    variant: ModelVariant,
    assumptions: AssumptionVector,
    defaults: DefaultsSnapshot,
    fixed: FixedInputs,
    /// The server's original valuation outputs, redisplayed verbatim on reset.
    baseline_outputs: ValuationOutputs,
    displayed_outputs: ValuationOutputs,
    /// Bumped on every applied input mutation; stale authoritative responses
    /// are detected by comparing against the revision captured at submit time.
    revision: u64,
}

impl ValuationSession {
    pub fn new(
        ticker: String,
        variant: ModelVariant,
        assumptions: AssumptionVector,
        defaults: DefaultsSnapshot,
        fixed: FixedInputs,
        baseline_outputs: ValuationOutputs,
    ) -> Self {
        ValuationSession {
            id: Uuid::new_v4(),
            ticker,
            variant,
            assumptions,
            defaults,
            fixed,
            displayed_outputs: baseline_outputs.clone(),
            baseline_outputs,
            revision: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn variant(&self) -> ModelVariant {
        self.variant
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn assumptions(&self) -> &AssumptionVector {
        &self.assumptions
    }

    pub fn fixed(&self) -> &FixedInputs {
        &self.fixed
    }

    pub fn displayed_outputs(&self) -> &ValuationOutputs {
        &self.displayed_outputs
    }

    pub fn baseline_outputs(&self) -> &ValuationOutputs {
        &self.baseline_outputs
    }

    pub fn get(&self, field: FieldId, period: usize) -> Result<f64> {
        self.assumptions.get(field, period)
    }

    pub fn is_overridden(&self, field: FieldId, period: usize) -> Result<bool> {
        self.assumptions.is_overridden(field, period)
    }

    /// Apply one edit, marking the canonical cell overridden. Returns the
    /// canonical field written.
    pub fn set(&mut self, field: FieldId, period: usize, value: f64) -> Result<FieldId> {
        let canonical = self.assumptions.set(field, period, value)?;
        self.revision += 1;
        Ok(canonical)
    }

    /// Restore a canonical cell to a recorded pre-edit state.
    pub fn restore_cell(
        &mut self,
        field: FieldId,
        period: usize,
        value: f64,
        overridden: bool,
    ) -> Result<()> {
        self.assumptions.write_raw(field, period, value, overridden)?;
        self.revision += 1;
        Ok(())
    }

    /// Restore all assumptions and override flags from the defaults snapshot
    /// and redisplay the server's original valuation outputs exactly.
    ///
    /// Purely local: never calls the recalculation service.
    pub fn reset(&mut self) {
        debug!(
            "Resetting session {} ({}/{:?}) to server defaults",
            self.id,
            self.ticker,
            self.variant
        );
        self.assumptions.reset(&self.defaults);
        self.displayed_outputs = self.baseline_outputs.clone();
        self.revision += 1;
    }

    /// Recompute the projection from current assumptions and update the
    /// displayed outputs. Synchronous and O(period count).
    pub fn recompute(&mut self) -> Result<ProjectionResult> {
        let result = model_for(self.variant).compute(&self.assumptions, &self.fixed)?;
        self.displayed_outputs = result.outputs.clone();
        Ok(result)
    }

    /// Overwrite only the displayed valuation outputs with authoritative
    /// numbers. Assumptions and override flags are untouched, and the
    /// revision does not move: this is not an input mutation.
    pub fn apply_authoritative(&mut self, outputs: ValuationOutputs) {
        self.displayed_outputs = outputs;
    }
}

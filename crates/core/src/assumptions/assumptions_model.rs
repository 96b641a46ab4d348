//! Per-period assumption storage with override tracking.
//!
//! The vector stores canonical fields only; coupled view fields resolve
//! through their [`Coupling`](crate::fields::Coupling) on every get/set.
//! Override flags live on the canonical cell, so editing either view of a
//! stored value marks the same cell.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::constants::{DEFAULT_STAGE_ONE_YEARS, MAX_STAGE_ONE_YEARS, MIN_STAGE_ONE_YEARS, PROJECTION_PERIODS};
use crate::errors::{Error, Result, ValidationError};
use crate::fields::{field_spec, schema, FieldId, FieldSpec, FieldStorage, ModelVariant};

/// Immutable deep copy of the server-provided default assumptions.
///
/// Source of truth for `reset`; never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultsSnapshot {
    values: BTreeMap<FieldId, Vec<f64>>,
}

impl DefaultsSnapshot {
    pub(crate) fn new(values: BTreeMap<FieldId, Vec<f64>>) -> Self {
        DefaultsSnapshot { values }
    }

    pub fn values(&self) -> &BTreeMap<FieldId, Vec<f64>> {
        &self.values
    }
}

/// Ordered, fixed-length per-period assumption scalars plus a same-shaped
/// override mask.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssumptionVector {
    variant: ModelVariant,
    values: BTreeMap<FieldId, Vec<f64>>,
    overrides: BTreeMap<FieldId, Vec<bool>>,
}

impl AssumptionVector {
    /// Build a vector from server defaults, validating the shape against the
    /// variant schema. Coupled views must not appear: they have no storage.
    pub fn from_defaults(
        variant: ModelVariant,
        defaults: &BTreeMap<FieldId, Vec<f64>>,
    ) -> Result<(Self, DefaultsSnapshot)> {
        for field in defaults.keys() {
            match field_spec(variant, *field) {
                None => {
                    return Err(Error::UnknownField {
                        variant,
                        field: *field,
                    })
                }
                Some(spec) if !matches!(spec.storage, FieldStorage::Canonical) => {
                    return Err(ValidationError::UnexpectedField(format!("{:?}", field)).into())
                }
                Some(_) => {}
            }
        }

        let period_count = resolved_period_count(variant, defaults);
        let mut values = BTreeMap::new();
        let mut overrides = BTreeMap::new();
        for spec in canonical_specs(variant) {
            let expected = if spec.per_period { period_count } else { 1 };
            let seq = defaults
                .get(&spec.id)
                .ok_or_else(|| ValidationError::MissingField(format!("{:?}", spec.id)))?;
            if seq.len() != expected {
                return Err(ValidationError::ShapeMismatch {
                    field: format!("{:?}", spec.id),
                    expected,
                    actual: seq.len(),
                }
                .into());
            }
            values.insert(spec.id, seq.clone());
            overrides.insert(spec.id, vec![false; expected]);
        }

        let snapshot = DefaultsSnapshot::new(values.clone());
        Ok((
            AssumptionVector {
                variant,
                values,
                overrides,
            },
            snapshot,
        ))
    }

    pub fn variant(&self) -> ModelVariant {
        self.variant
    }

    /// Number of projection periods for this vector.
    ///
    /// Fixed for the DCF variants; read from the stage-one-years assumption
    /// (clamped to the allowed range) for the two-stage model. Changing it
    /// never resizes other fields: all two-stage fields are scalar.
    pub fn period_count(&self) -> usize {
        match self.variant {
            ModelVariant::FcfMarginDcf | ModelVariant::EarningsExitDcf => PROJECTION_PERIODS,
            ModelVariant::GordonGrowth => 1,
            ModelVariant::TwoStageDdm => {
                let raw = self
                    .values
                    .get(&FieldId::StageOneYears)
                    .and_then(|seq| seq.first().copied())
                    .unwrap_or(DEFAULT_STAGE_ONE_YEARS as f64);
                (raw.round() as i64).clamp(MIN_STAGE_ONE_YEARS as i64, MAX_STAGE_ONE_YEARS as i64)
                    as usize
            }
        }
    }

    /// Read a field for display, resolving coupled views.
    pub fn get(&self, field: FieldId, period: usize) -> Result<f64> {
        let spec = self.spec(field)?;
        match spec.storage {
            FieldStorage::Canonical => self.get_raw(field, period),
            FieldStorage::View(coupling) => {
                let stored = self.get_raw(coupling.canonical(), period)?;
                let gm = self.gross_margin_at(period)?;
                Ok(coupling.from_canonical(stored, gm))
            }
        }
    }

    /// Read a canonical cell directly.
    pub fn get_raw(&self, field: FieldId, period: usize) -> Result<f64> {
        let seq = self
            .values
            .get(&field)
            .ok_or(Error::UnknownField {
                variant: self.variant,
                field,
            })?;
        seq.get(period).copied().ok_or(Error::PeriodOutOfRange {
            field,
            period,
            len: seq.len(),
        })
    }

    /// Write a field, resolving coupled views to their canonical cell, and
    /// mark the canonical cell overridden. Returns the canonical field
    /// actually written.
    pub fn set(&mut self, field: FieldId, period: usize, value: f64) -> Result<FieldId> {
        let spec = self.spec(field)?;
        let (canonical, stored) = match spec.storage {
            FieldStorage::Canonical => (field, value),
            FieldStorage::View(coupling) => {
                let gm = self.gross_margin_at(period)?;
                (coupling.canonical(), coupling.to_canonical(value, gm))
            }
        };
        self.write_raw(canonical, period, stored, true)?;
        Ok(canonical)
    }

    /// Write a canonical cell with an explicit override flag. Used by the
    /// edit state machine to revert a cell to its pre-edit state.
    pub fn write_raw(
        &mut self,
        field: FieldId,
        period: usize,
        value: f64,
        overridden: bool,
    ) -> Result<()> {
        let variant = self.variant;
        let seq = self.values.get_mut(&field).ok_or(Error::UnknownField {
            variant,
            field,
        })?;
        let len = seq.len();
        let slot = seq.get_mut(period).ok_or(Error::PeriodOutOfRange {
            field,
            period,
            len,
        })?;
        *slot = value;

        // Shapes of values and overrides are identical by construction.
        if let Some(flags) = self.overrides.get_mut(&field) {
            if let Some(flag) = flags.get_mut(period) {
                *flag = overridden;
            }
        }
        Ok(())
    }

    /// Whether the canonical cell behind this field has been explicitly
    /// edited since the last reset.
    pub fn is_overridden(&self, field: FieldId, period: usize) -> Result<bool> {
        let canonical = self.spec(field)?.canonical_id();
        let flags = self
            .overrides
            .get(&canonical)
            .ok_or(Error::UnknownField {
                variant: self.variant,
                field: canonical,
            })?;
        flags.get(period).copied().ok_or(Error::PeriodOutOfRange {
            field: canonical,
            period,
            len: flags.len(),
        })
    }

    /// Restore every field and the whole override mask from the snapshot.
    ///
    /// Both replacement maps are fully built before either assignment, so a
    /// reset is all-or-nothing.
    pub fn reset(&mut self, snapshot: &DefaultsSnapshot) {
        let values = snapshot.values.clone();
        let overrides: BTreeMap<FieldId, Vec<bool>> = values
            .iter()
            .map(|(field, seq)| (*field, vec![false; seq.len()]))
            .collect();
        self.values = values;
        self.overrides = overrides;
    }

    /// Canonical values, keyed by field - the wire shape for recalculation
    /// requests.
    pub fn canonical_values(&self) -> &BTreeMap<FieldId, Vec<f64>> {
        &self.values
    }

    fn spec(&self, field: FieldId) -> Result<&'static FieldSpec> {
        field_spec(self.variant, field).ok_or(Error::UnknownField {
            variant: self.variant,
            field,
        })
    }

    /// Gross margin at `period`, used as coupling context. Variants without a
    /// gross margin field never carry residual couplings, so 0 is inert.
    fn gross_margin_at(&self, period: usize) -> Result<f64> {
        if field_spec(self.variant, FieldId::GrossMargin).is_some() {
            self.get_raw(FieldId::GrossMargin, period)
        } else {
            Ok(0.0)
        }
    }
}

fn canonical_specs(variant: ModelVariant) -> impl Iterator<Item = &'static FieldSpec> {
    schema(variant)
        .iter()
        .filter(|spec| matches!(spec.storage, FieldStorage::Canonical))
}

/// Period count implied by a defaults map before the vector exists.
fn resolved_period_count(variant: ModelVariant, defaults: &BTreeMap<FieldId, Vec<f64>>) -> usize {
    match variant {
        ModelVariant::FcfMarginDcf | ModelVariant::EarningsExitDcf => PROJECTION_PERIODS,
        ModelVariant::GordonGrowth => 1,
        ModelVariant::TwoStageDdm => {
            let raw = defaults
                .get(&FieldId::StageOneYears)
                .and_then(|seq| seq.first().copied())
                .unwrap_or(DEFAULT_STAGE_ONE_YEARS as f64);
            (raw.round() as i64).clamp(MIN_STAGE_ONE_YEARS as i64, MAX_STAGE_ONE_YEARS as i64)
                as usize
        }
    }
}

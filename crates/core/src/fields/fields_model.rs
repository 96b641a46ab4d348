//! Field identifiers and per-variant field schemas.
//!
//! Every editable grid field is a [`FieldId`] with an associated [`FieldSpec`]
//! in the variant's schema table: its input kind, whether it is stored
//! per-period or as a scalar, and whether it is canonical storage or a coupled
//! view of a canonical field. Adding a field to a variant is a table entry,
//! not a new match arm.

use serde::{Deserialize, Serialize};

use super::coupling::Coupling;

/// The valuation model variants supported per analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModelVariant {
    /// Revenue-driven DCF where FCF is an exogenous margin assumption.
    FcfMarginDcf,
    /// Net-income DCF with a P/E exit multiple terminal value.
    EarningsExitDcf,
    /// Gordon Growth (single-stage perpetuity) dividend model.
    GordonGrowth,
    /// High-growth phase for N periods, then a perpetuity.
    TwoStageDdm,
}

impl ModelVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelVariant::FcfMarginDcf => "FCF_MARGIN_DCF",
            ModelVariant::EarningsExitDcf => "EARNINGS_EXIT_DCF",
            ModelVariant::GordonGrowth => "GORDON_GROWTH",
            ModelVariant::TwoStageDdm => "TWO_STAGE_DDM",
        }
    }
}

/// Identifier for every editable grid field across all variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    // FCF-margin DCF
    RevenueGrowth,
    GrossMargin,
    CostOfRevenuePct,
    OpexPct,
    EbitMargin,
    TaxRate,
    FcfMargin,

    // Earnings / P/E-exit DCF (RevenueGrowth and TaxRate shared)
    OperatingMargin,
    SharesGrowth,
    CapexPct,
    DaPct,
    ExitPeMultiple,

    // Gordon Growth
    DividendGrowth,

    // Two-stage DDM
    StageOneGrowth,
    StageOneYears,
    TerminalGrowth,
}

/// How raw cell text is interpreted, and how the value renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputKind {
    /// Entered in percent points ("12.5" or "12.5%"), stored as a fraction.
    Percent,
    /// A raw valuation multiple ("20" or "20x").
    Multiple,
    /// A whole number of periods, bounded by the variant's allowed range.
    PeriodCount,
}

/// Whether a field owns storage or writes through a coupling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStorage {
    Canonical,
    View(Coupling),
}

/// Schema entry for one field of one variant.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub id: FieldId,
    pub input: InputKind,
    /// Per-period fields hold one value per projection period; scalar fields
    /// hold exactly one value regardless of the period count.
    pub per_period: bool,
    pub storage: FieldStorage,
}

impl FieldSpec {
    pub const fn canonical(id: FieldId, input: InputKind, per_period: bool) -> Self {
        FieldSpec {
            id,
            input,
            per_period,
            storage: FieldStorage::Canonical,
        }
    }

    pub const fn view(id: FieldId, input: InputKind, per_period: bool, coupling: Coupling) -> Self {
        FieldSpec {
            id,
            input,
            per_period,
            storage: FieldStorage::View(coupling),
        }
    }

    /// The field this spec writes through to (itself when canonical).
    pub fn canonical_id(&self) -> FieldId {
        match self.storage {
            FieldStorage::Canonical => self.id,
            FieldStorage::View(coupling) => coupling.canonical(),
        }
    }
}

const FCF_MARGIN_DCF_FIELDS: &[FieldSpec] = &[
    FieldSpec::canonical(FieldId::RevenueGrowth, InputKind::Percent, true),
    FieldSpec::canonical(FieldId::GrossMargin, InputKind::Percent, true),
    FieldSpec::view(
        FieldId::CostOfRevenuePct,
        InputKind::Percent,
        true,
        Coupling::ComplementOf(FieldId::GrossMargin),
    ),
    FieldSpec::canonical(FieldId::OpexPct, InputKind::Percent, true),
    FieldSpec::view(
        FieldId::EbitMargin,
        InputKind::Percent,
        true,
        Coupling::GrossMarginResidualOf(FieldId::OpexPct),
    ),
    FieldSpec::canonical(FieldId::TaxRate, InputKind::Percent, true),
    FieldSpec::canonical(FieldId::FcfMargin, InputKind::Percent, true),
];

const EARNINGS_EXIT_DCF_FIELDS: &[FieldSpec] = &[
    FieldSpec::canonical(FieldId::RevenueGrowth, InputKind::Percent, true),
    FieldSpec::canonical(FieldId::OperatingMargin, InputKind::Percent, true),
    FieldSpec::canonical(FieldId::TaxRate, InputKind::Percent, true),
    FieldSpec::canonical(FieldId::SharesGrowth, InputKind::Percent, true),
    FieldSpec::canonical(FieldId::CapexPct, InputKind::Percent, true),
    FieldSpec::canonical(FieldId::DaPct, InputKind::Percent, true),
    FieldSpec::canonical(FieldId::ExitPeMultiple, InputKind::Multiple, false),
];

const GORDON_GROWTH_FIELDS: &[FieldSpec] =
    &[FieldSpec::canonical(FieldId::DividendGrowth, InputKind::Percent, false)];

const TWO_STAGE_DDM_FIELDS: &[FieldSpec] = &[
    FieldSpec::canonical(FieldId::StageOneGrowth, InputKind::Percent, false),
    FieldSpec::canonical(FieldId::StageOneYears, InputKind::PeriodCount, false),
    FieldSpec::canonical(FieldId::TerminalGrowth, InputKind::Percent, false),
];

/// The full field schema for a variant.
pub fn schema(variant: ModelVariant) -> &'static [FieldSpec] {
    match variant {
        ModelVariant::FcfMarginDcf => FCF_MARGIN_DCF_FIELDS,
        ModelVariant::EarningsExitDcf => EARNINGS_EXIT_DCF_FIELDS,
        ModelVariant::GordonGrowth => GORDON_GROWTH_FIELDS,
        ModelVariant::TwoStageDdm => TWO_STAGE_DDM_FIELDS,
    }
}

/// Look up one field's spec within a variant's schema.
pub fn field_spec(variant: ModelVariant, field: FieldId) -> Option<&'static FieldSpec> {
    schema(variant).iter().find(|spec| spec.id == field)
}

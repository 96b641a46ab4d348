//! Bidirectional linear couplings between a derived view field and the
//! canonical field it writes through to.
//!
//! Both rules are involutions: applying the same formula converts in either
//! direction, so displaying the view right after an edit reproduces the edited
//! value exactly (within floating tolerance).

use super::fields_model::FieldId;

/// Algebraic relationship between a view field and its canonical storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coupling {
    /// view = 1 - canonical (cost-of-revenue% vs. gross margin).
    ComplementOf(FieldId),
    /// view = gross margin - canonical (EBIT margin% vs. opex%), where the
    /// gross margin is read from the same period of the vector.
    GrossMarginResidualOf(FieldId),
}

impl Coupling {
    /// The canonical field this coupling writes through to.
    pub fn canonical(&self) -> FieldId {
        match self {
            Coupling::ComplementOf(field) => *field,
            Coupling::GrossMarginResidualOf(field) => *field,
        }
    }

    /// Canonical value to store for an edited view value.
    pub fn to_canonical(&self, edited: f64, gross_margin: f64) -> f64 {
        match self {
            Coupling::ComplementOf(_) => 1.0 - edited,
            Coupling::GrossMarginResidualOf(_) => gross_margin - edited,
        }
    }

    /// View value to display for a stored canonical value.
    pub fn from_canonical(&self, stored: f64, gross_margin: f64) -> f64 {
        match self {
            Coupling::ComplementOf(_) => 1.0 - stored,
            Coupling::GrossMarginResidualOf(_) => gross_margin - stored,
        }
    }
}

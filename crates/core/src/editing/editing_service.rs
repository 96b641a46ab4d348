//! The edit registry - single source of truth for open cell editors.
//!
//! The presentation layer invokes `open`/`live_update`/`commit`/`cancel` on
//! user interaction and queries `is_editing` before overwriting any cell; the
//! core never inspects rendering internals. Editors are keyed by the
//! *canonical* cell, so two coupled views of one stored value cannot be open
//! at once, while editors on different cells coexist.

use std::collections::HashMap;

use log::debug;

use crate::constants::{MAX_STAGE_ONE_YEARS, MIN_STAGE_ONE_YEARS};
use crate::errors::{EditError, Error, Result};
use crate::fields::{field_spec, InputKind};
use crate::session::ValuationSession;

use super::editing_model::{CellRef, EditOutcome, EditSession, EditState, RedrawScope};

/// Parse raw cell text into a stored value.
///
/// Unit decorations are stripped ($ prefix, thousands separators, %, x).
/// Percent fields are entered in percent points and stored as fractions.
/// Returns `None` on any failure; callers treat that as "ignore keystroke"
/// (live) or "revert" (commit) - invalid input is never surfaced.
pub fn parse_cell_input(raw: &str, kind: InputKind) -> Option<f64> {
    let cleaned = raw
        .trim()
        .trim_start_matches('$')
        .replace(',', "");
    let cleaned = cleaned
        .trim()
        .trim_end_matches(['%', 'x', 'X'])
        .trim();
    if cleaned.is_empty() {
        return None;
    }
    let value: f64 = cleaned.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    match kind {
        InputKind::Percent => Some(value / 100.0),
        InputKind::Multiple => Some(value),
        InputKind::PeriodCount => {
            let rounded = value.round();
            if (value - rounded).abs() > 1e-9 {
                return None;
            }
            if rounded < MIN_STAGE_ONE_YEARS as f64 || rounded > MAX_STAGE_ONE_YEARS as f64 {
                return None;
            }
            Some(rounded)
        }
    }
}

/// Registry of open edit sessions, keyed by canonical cell.
#[derive(Debug, Default)]
pub struct EditRegistry {
    open: HashMap<CellRef, EditSession>,
}

impl EditRegistry {
    pub fn new() -> Self {
        EditRegistry {
            open: HashMap::new(),
        }
    }

    /// Whether the storage cell behind `cell` has an open editor. The
    /// renderer checks this before overwriting a cell's text.
    pub fn is_editing(&self, session: &ValuationSession, cell: CellRef) -> bool {
        match canonical_cell(session, cell) {
            Ok(canonical) => self.open.contains_key(&canonical),
            Err(_) => false,
        }
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Idle -> Editing: activate a cell. Other open editors are untouched.
    pub fn open(&mut self, session: &ValuationSession, cell: CellRef) -> Result<()> {
        let canonical = canonical_cell(session, cell)?;
        if self.open.contains_key(&canonical) {
            return Err(EditError::CellBusy {
                field: canonical.field,
                period: canonical.period,
            }
            .into());
        }
        let original_value = session
            .assumptions()
            .get_raw(canonical.field, canonical.period)?;
        let original_override = session.is_overridden(canonical.field, canonical.period)?;
        self.open.insert(
            canonical,
            EditSession {
                cell,
                canonical,
                original_value,
                original_override,
                state: EditState::Editing,
            },
        );
        debug!("Opened editor on {:?} (canonical {:?})", cell, canonical);
        Ok(())
    }

    /// Editing -> LiveUpdating: apply one keystroke's worth of text.
    ///
    /// A failed parse mutates nothing and returns `Ok(None)`. A successful
    /// parse applies the value, marks the override, recomputes, and tells the
    /// caller to redraw everything except the cell under edit.
    pub fn live_update(
        &mut self,
        session: &mut ValuationSession,
        cell: CellRef,
        raw: &str,
    ) -> Result<Option<EditOutcome>> {
        let canonical = canonical_cell(session, cell)?;
        let kind = input_kind(session, cell)?;
        let edit = self
            .open
            .get_mut(&canonical)
            .ok_or(EditError::NoOpenEditor {
                field: cell.field,
                period: cell.period,
            })?;

        let value = match parse_cell_input(raw, kind) {
            Some(value) => value,
            None => return Ok(None),
        };
        edit.state = EditState::LiveUpdating;
        session.set(cell.field, cell.period, value)?;
        let result = session.recompute()?;
        Ok(Some(EditOutcome {
            applied: true,
            result,
            redraw: RedrawScope::AllExcept(cell),
        }))
    }

    /// Editing -> Committed: re-parse the final text; apply it, or revert the
    /// canonical cell to its pre-edit value and override flag. Either way the
    /// whole grid is redisplayed.
    pub fn commit(
        &mut self,
        session: &mut ValuationSession,
        cell: CellRef,
        raw: &str,
    ) -> Result<EditOutcome> {
        let canonical = canonical_cell(session, cell)?;
        let kind = input_kind(session, cell)?;
        let mut edit = self
            .open
            .remove(&canonical)
            .ok_or(EditError::NoOpenEditor {
                field: cell.field,
                period: cell.period,
            })?;

        let applied = match parse_cell_input(raw, kind) {
            Some(value) => {
                session.set(cell.field, cell.period, value)?;
                true
            }
            None => {
                session.restore_cell(
                    canonical.field,
                    canonical.period,
                    edit.original_value,
                    edit.original_override,
                )?;
                false
            }
        };
        edit.state = EditState::Committed;
        debug!(
            "Editor on {:?} -> {:?} (applied={})",
            edit.cell, edit.state, applied
        );

        let result = session.recompute()?;
        Ok(EditOutcome {
            applied,
            result,
            redraw: RedrawScope::Full,
        })
    }

    /// Editing -> Cancelled: unconditionally revert and redisplay.
    pub fn cancel(&mut self, session: &mut ValuationSession, cell: CellRef) -> Result<EditOutcome> {
        let canonical = canonical_cell(session, cell)?;
        let mut edit = self
            .open
            .remove(&canonical)
            .ok_or(EditError::NoOpenEditor {
                field: cell.field,
                period: cell.period,
            })?;

        session.restore_cell(
            canonical.field,
            canonical.period,
            edit.original_value,
            edit.original_override,
        )?;
        edit.state = EditState::Cancelled;
        debug!("Editor on {:?} -> {:?}", edit.cell, edit.state);

        let result = session.recompute()?;
        Ok(EditOutcome {
            applied: false,
            result,
            redraw: RedrawScope::Full,
        })
    }
}

fn canonical_cell(session: &ValuationSession, cell: CellRef) -> Result<CellRef> {
    let spec = field_spec(session.variant(), cell.field).ok_or(Error::UnknownField {
        variant: session.variant(),
        field: cell.field,
    })?;
    Ok(CellRef::new(spec.canonical_id(), cell.period))
}

fn input_kind(session: &ValuationSession, cell: CellRef) -> Result<InputKind> {
    let spec = field_spec(session.variant(), cell.field).ok_or(Error::UnknownField {
        variant: session.variant(),
        field: cell.field,
    })?;
    Ok(spec.input)
}

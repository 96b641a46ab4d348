//! Session construction from a backend analysis payload.

use log::{debug, info};

use crate::analysis::AnalysisPayload;
use crate::assumptions::AssumptionVector;
use crate::errors::Result;

use super::session_model::ValuationSession;

/// Build one session per available model variant.
///
/// Unavailable variants are skipped entirely - no session object exists for
/// them. Shape errors in a payload's defaults are surfaced, not patched.
pub fn build_sessions(payload: &AnalysisPayload) -> Result<Vec<ValuationSession>> {
    let mut sessions = Vec::with_capacity(payload.models.len());
    for model in &payload.models {
        if !model.available {
            debug!(
                "Skipping {:?} for {}: model not applicable",
                model.variant, payload.ticker
            );
            continue;
        }
        let (assumptions, defaults) =
            AssumptionVector::from_defaults(model.variant, &model.defaults)?;
        sessions.push(ValuationSession::new(
            payload.ticker.clone(),
            model.variant,
            assumptions,
            defaults,
            model.fixed.clone(),
            model.baseline.clone(),
        ));
    }
    info!(
        "Built {} valuation session(s) for {} (payload as of {})",
        sessions.len(),
        payload.ticker,
        payload.as_of
    );
    Ok(sessions)
}

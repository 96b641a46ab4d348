//! Coordinates authoritative recalculation against the external service.
//!
//! The flow is split into `begin` / `execute` / `merge` so an event loop can
//! await the network call without holding `&mut` on the session, then merge
//! the response against whatever the session looks like by the time it lands.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, warn};

use crate::errors::{RecalcError, Result};
use crate::projection::ValuationOutputs;
use crate::session::ValuationSession;

use super::reconciliation_model::{RecalcRequest, RecalcStatus, RecalcTicket};
use super::reconciliation_traits::RecalculationClientTrait;

/// Serializes recalculation round trips for one session holder.
///
/// At most one request is in flight at a time; a second `begin` while one is
/// outstanding fails with [`RecalcError::InFlight`]. Responses that arrive
/// after further local edits are discarded rather than applied over newer
/// numbers.
pub struct ReconciliationCoordinator {
    client: Arc<dyn RecalculationClientTrait>,
    in_flight: AtomicBool,
    next_token: AtomicU64,
}

impl ReconciliationCoordinator {
    pub fn new(client: Arc<dyn RecalculationClientTrait>) -> Self {
        ReconciliationCoordinator {
            client,
            in_flight: AtomicBool::new(false),
            next_token: AtomicU64::new(1),
        }
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Snapshot the session into a request and take the in-flight gate.
    pub fn begin(&self, session: &ValuationSession) -> Result<RecalcTicket> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(RecalcError::InFlight.into());
        }
        let token = self.next_token.fetch_add(1, Ordering::SeqCst);
        debug!(
            "Submitting recalculation #{} for {} ({:?}) at revision {}",
            token,
            session.ticker(),
            session.variant(),
            session.revision()
        );
        Ok(RecalcTicket {
            token,
            revision: session.revision(),
            request: RecalcRequest {
                ticker: session.ticker().to_string(),
                variant: session.variant(),
                assumptions: session.assumptions().canonical_values().clone(),
                fixed: session.fixed().clone(),
            },
        })
    }

    /// Run the network call for a ticket. On failure the gate is released and
    /// the displayed outputs are left as they are.
    pub async fn execute(&self, ticket: &RecalcTicket) -> Result<ValuationOutputs> {
        match self.client.recalculate(&ticket.request).await {
            Ok(outputs) => Ok(outputs),
            Err(err) => {
                self.in_flight.store(false, Ordering::SeqCst);
                warn!(
                    "Recalculation #{} for {} failed: {}",
                    ticket.token, ticket.request.ticker, err
                );
                Err(err.into())
            }
        }
    }

    /// Merge a completed response into the session.
    ///
    /// If the session revision still matches the ticket, the authoritative
    /// outputs replace the displayed ones; otherwise the user edited while
    /// the request was in flight and the response is dropped.
    pub fn merge(
        &self,
        session: &mut ValuationSession,
        ticket: RecalcTicket,
        outputs: ValuationOutputs,
    ) -> RecalcStatus {
        self.in_flight.store(false, Ordering::SeqCst);
        if session.revision() != ticket.revision {
            warn!(
                "Discarding stale recalculation #{} for {}: revision {} != {}",
                ticket.token,
                ticket.request.ticker,
                ticket.revision,
                session.revision()
            );
            return RecalcStatus::Stale;
        }
        debug!(
            "Applying authoritative outputs #{} for {}",
            ticket.token,
            ticket.request.ticker
        );
        session.apply_authoritative(outputs);
        RecalcStatus::Applied
    }

    /// Convenience wrapper for callers that can hold the session across the
    /// await: begin, execute, merge.
    pub async fn recalculate(&self, session: &mut ValuationSession) -> Result<RecalcStatus> {
        let ticket = self.begin(session)?;
        let outputs = self.execute(&ticket).await?;
        Ok(self.merge(session, ticket, outputs))
    }
}

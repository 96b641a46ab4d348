//! Reconciliation module - round trips to the authoritative recalculation
//! service and merge-or-discard of their results.

mod reconciliation_model;
mod reconciliation_service;
mod reconciliation_traits;

// Re-export the public interface
pub use reconciliation_model::{RecalcRequest, RecalcStatus, RecalcTicket};
pub use reconciliation_service::ReconciliationCoordinator;
pub use reconciliation_traits::RecalculationClientTrait;

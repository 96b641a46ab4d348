//! Session module - the per-analysis aggregate and its construction.

mod session_model;
mod session_service;
#[cfg(test)]
mod session_service_tests;

// Re-export the public interface
pub use session_model::ValuationSession;
pub use session_service::build_sessions;

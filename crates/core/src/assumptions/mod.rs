//! Assumptions module - per-period assumption storage, override mask, and
//! server-default snapshots.

mod assumptions_model;
#[cfg(test)]
mod assumptions_model_tests;

// Re-export the public interface
pub use assumptions_model::{AssumptionVector, DefaultsSnapshot};

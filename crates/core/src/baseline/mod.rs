//! Baseline module - historical actuals and default assumption derivation.

mod baseline_model;
mod baseline_service;
#[cfg(test)]
mod baseline_service_tests;

// Re-export the public interface
pub use baseline_model::{resolve_beta, CapmRates, DividendYear, GrowthPolicy, YearData};
pub use baseline_service::{
    derive_dividend_defaults, derive_earnings_dcf_defaults, fill_dps_growth, fill_growth_rates,
    weighted_growth, DividendDefaults, EarningsDcfDefaults,
};

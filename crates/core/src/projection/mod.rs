//! Projection module - the four valuation engines and their shared models.

mod earnings_exit;
mod fcf_margin;
mod gordon_growth;
mod projection_model;
mod projection_traits;
mod two_stage;

// Re-export the public interface
pub use earnings_exit::EarningsExitDcfModel;
pub use fcf_margin::FcfMarginDcfModel;
pub use gordon_growth::GordonGrowthModel;
pub use projection_model::{FixedInputs, ProjectionResult, ProjectionRow, ValuationOutputs};
pub use projection_traits::{model_for, ValuationModelTrait};
pub use two_stage::TwoStageDdmModel;

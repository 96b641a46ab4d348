use async_trait::async_trait;

use crate::errors::RecalcError;
use crate::projection::ValuationOutputs;

use super::reconciliation_model::RecalcRequest;

/// Trait for the external authoritative recalculation service.
///
/// Implementations live outside the core (the recalc-client crate provides
/// an HTTP one); tests use in-memory fakes.
#[async_trait]
pub trait RecalculationClientTrait: Send + Sync {
    async fn recalculate(&self, request: &RecalcRequest) -> Result<ValuationOutputs, RecalcError>;
}

//! Calculator API trait

use async_trait::async_trait;

use crate::errors::CalculatorError;
use crate::models::{CalculationRequest, CalculationResult};

/// Calculator API trait
///
/// Evaluates a single binary operation on arbitrary-precision integers.
/// Implementations are stateless: identical requests yield identical results.
#[async_trait]
pub trait CalculatorClientV1: Send + Sync {
    /// Parse both operands and apply the requested operator.
    async fn evaluate(
        &self,
        req: &CalculationRequest,
    ) -> Result<CalculationResult, CalculatorError>;
}

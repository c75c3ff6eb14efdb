//! Local implementation of `CalculatorClientV1`.
//!
//! Used by the REST layer and by any in-process consumer. Delegates to the
//! domain service without any transport in between. Requests with long
//! operands run on the blocking pool so they do not stall async workers.

use std::sync::Arc;

use async_trait::async_trait;
use calculator_sdk::{CalculationRequest, CalculationResult, CalculatorClientV1, CalculatorError};

use crate::domain::Service;

/// Combined operand length up to which evaluation runs on the calling task.
pub const INLINE_EVAL_MAX_LEN: usize = 4096;

pub struct CalculatorLocalClient {
    service: Arc<Service>,
}

impl CalculatorLocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CalculatorClientV1 for CalculatorLocalClient {
    async fn evaluate(
        &self,
        req: &CalculationRequest,
    ) -> Result<CalculationResult, CalculatorError> {
        if req.op1.len() + req.op2.len() <= INLINE_EVAL_MAX_LEN {
            return self.service.evaluate(req);
        }

        let service = Arc::clone(&self.service);
        let req = req.clone();
        match tokio::task::spawn_blocking(move || service.evaluate(&req)).await {
            Ok(result) => result,
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}

//! REST DTOs for calculator module
//!
//! These types are transport-specific (serde + utoipa for REST/OpenAPI).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fields of the HTML form. Missing fields are empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CalcForm {
    pub op1: String,
    pub op2: String,
    pub op: String,
}

/// Request to evaluate one binary operation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EvaluateRequest {
    /// First operand, signed base-10 integer of any length
    #[schema(example = "123456789012345678901234567890")]
    pub op1: String,
    /// Second operand, signed base-10 integer of any length
    #[schema(example = "-7")]
    pub op2: String,
    /// Operator token: `add`, `sub`, `multi` or `div`. Other tokens evaluate to 0.
    #[schema(example = "div")]
    pub op: String,
}

/// Evaluation result, echoing the inputs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EvaluateResponse {
    pub op1: String,
    pub op2: String,
    pub op: String,
    /// Canonical base-10 result
    pub result: String,
}

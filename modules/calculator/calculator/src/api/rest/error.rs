use calc_errors::Problem;
use calculator_sdk::CalculatorError;

use crate::errors;

/// Map a calculator error to an RFC 9457 Problem using the catalog.
///
/// `request_id` is the `x-request-id` of the failing request and becomes the
/// problem's `trace_id`.
pub fn calculator_error_to_problem(
    e: &CalculatorError,
    instance: &str,
    request_id: Option<String>,
) -> Problem {
    match e {
        CalculatorError::Parse { .. } => {
            errors::INVALID_OPERAND.with_context(e.to_string(), instance, request_id)
        }
        CalculatorError::DivideByZero => errors::DIVISION_BY_ZERO.with_context(
            "the second operand is zero",
            instance,
            request_id,
        ),
    }
}

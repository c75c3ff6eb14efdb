//! Domain service for calculator
//!
//! Parses both operands as signed base-10 integers of arbitrary magnitude and
//! applies the selected operator.

use calculator_sdk::{
    CalculationRequest, CalculationResult, CalculatorError, OperandPosition, Operator,
    ParseFailure,
};
use num_bigint::BigInt;
use num_traits::{CheckedDiv, Zero};
use tracing::debug;

use crate::config::CalculatorConfig;

/// Stateless evaluator. Safe to share across any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct Service {
    max_operand_len: usize,
}

impl Default for Service {
    fn default() -> Self {
        Self::new(&CalculatorConfig::default())
    }
}

impl Service {
    #[must_use]
    pub fn new(config: &CalculatorConfig) -> Self {
        Self {
            max_operand_len: config.max_operand_len,
        }
    }

    /// Evaluate `op1 <operator> op2`.
    ///
    /// Both operands are parsed before any arithmetic; the first operand's
    /// failure is reported first.
    ///
    /// # Errors
    /// - [`CalculatorError::Parse`] if either operand is not a valid integer
    /// - [`CalculatorError::DivideByZero`] for `div` with a zero second operand
    pub fn evaluate(&self, req: &CalculationRequest) -> Result<CalculationResult, CalculatorError> {
        debug!(
            operator = %req.operator,
            op1_len = req.op1.len(),
            op2_len = req.op2.len(),
            "evaluating"
        );

        let lhs = parse_operand(&req.op1, OperandPosition::First, self.max_operand_len)?;
        let rhs = parse_operand(&req.op2, OperandPosition::Second, self.max_operand_len)?;

        apply(req.operator, &lhs, &rhs).map(CalculationResult::new)
    }
}

/// Parse one operand: optional `+`/`-`, then one or more ASCII digits.
///
/// Leading zeros are accepted. Whitespace, digit separators and radix
/// prefixes are not. `InvalidCharacter` reports a byte offset into `raw`.
///
/// # Errors
/// Returns [`CalculatorError::Parse`] tagged with `position`.
pub fn parse_operand(
    raw: &str,
    position: OperandPosition,
    max_len: usize,
) -> Result<BigInt, CalculatorError> {
    let fail = |reason| CalculatorError::parse(position, reason);

    if raw.is_empty() {
        return Err(fail(ParseFailure::Empty));
    }
    if raw.len() > max_len {
        return Err(fail(ParseFailure::TooLong {
            len: raw.len(),
            max: max_len,
        }));
    }

    let digits_start = usize::from(raw.starts_with(['+', '-']));
    let digits = &raw[digits_start..];
    if digits.is_empty() {
        return Err(fail(ParseFailure::MissingDigits));
    }
    if let Some((offset, _)) = digits.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        return Err(fail(ParseFailure::InvalidCharacter {
            index: digits_start + offset,
        }));
    }

    BigInt::parse_bytes(raw.as_bytes(), 10).ok_or_else(|| {
        fail(ParseFailure::InvalidCharacter {
            index: digits_start,
        })
    })
}

/// Apply `operator` to already parsed operands.
///
/// `Div` truncates toward zero. `Unrecognized` yields 0 without error.
///
/// # Errors
/// Returns [`CalculatorError::DivideByZero`] for `Div` when `rhs` is zero.
pub fn apply(operator: Operator, lhs: &BigInt, rhs: &BigInt) -> Result<BigInt, CalculatorError> {
    match operator {
        Operator::Add => Ok(lhs + rhs),
        Operator::Sub => Ok(lhs - rhs),
        Operator::Multi => Ok(lhs * rhs),
        Operator::Div => CheckedDiv::checked_div(lhs, rhs).ok_or(CalculatorError::DivideByZero),
        Operator::Unrecognized => Ok(BigInt::zero()),
    }
}

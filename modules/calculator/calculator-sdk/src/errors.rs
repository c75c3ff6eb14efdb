//! Public error types for the calculator module.

use thiserror::Error;

use crate::models::OperandPosition;

/// Errors returned by `CalculatorClientV1::evaluate`.
///
/// Both kinds depend only on the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    /// An operand is not a valid base-10 integer.
    #[error("{position} is not a valid base-10 integer: {reason}")]
    Parse {
        position: OperandPosition,
        reason: ParseFailure,
    },

    /// Division with a second operand equal to zero.
    #[error("division by zero")]
    DivideByZero,
}

impl CalculatorError {
    #[must_use]
    pub fn parse(position: OperandPosition, reason: ParseFailure) -> Self {
        Self::Parse { position, reason }
    }

    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    #[must_use]
    pub fn is_divide_by_zero(&self) -> bool {
        matches!(self, Self::DivideByZero)
    }
}

/// Why an operand was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("operand is empty")]
    Empty,

    #[error("sign is not followed by any digits")]
    MissingDigits,

    #[error("unexpected character at index {index}")]
    InvalidCharacter { index: usize },

    #[error("operand has {len} characters, the limit is {max}")]
    TooLong { len: usize, max: usize },
}

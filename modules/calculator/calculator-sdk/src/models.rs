//! Calculator request/result models.

use std::fmt;

use num_bigint::BigInt;

use crate::errors::CalculatorError;

/// Arithmetic operation selected by an operator token.
///
/// Tokens are matched exactly and case-sensitively. Any other token maps to
/// [`Operator::Unrecognized`], which performs no operation and evaluates to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `add`
    Add,
    /// `sub`
    Sub,
    /// `multi`
    Multi,
    /// `div`, truncating toward zero
    Div,
    /// Any other token. Evaluates to 0 without error.
    Unrecognized,
}

impl Operator {
    /// Operators with a token, in form display order.
    pub const SUPPORTED: [Self; 4] = [Self::Add, Self::Sub, Self::Multi, Self::Div];

    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "add" => Self::Add,
            "sub" => Self::Sub,
            "multi" => Self::Multi,
            "div" => Self::Div,
            _ => Self::Unrecognized,
        }
    }

    /// Canonical token; empty for [`Operator::Unrecognized`].
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Multi => "multi",
            Self::Div => "div",
            Self::Unrecognized => "",
        }
    }

    /// Symbol shown next to the form control.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Multi => "\u{d7}",
            Self::Div => "\u{f7}",
            Self::Unrecognized => "?",
        }
    }
}

impl From<&str> for Operator {
    fn from(token: &str) -> Self {
        Self::from_token(token)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized => f.write_str("unrecognized"),
            other => f.write_str(other.token()),
        }
    }
}

/// Which operand a parse failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandPosition {
    First,
    Second,
}

impl OperandPosition {
    /// Form field name of the operand.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            Self::First => "op1",
            Self::Second => "op2",
        }
    }
}

impl fmt::Display for OperandPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// One calculation, as received from a caller. Operands are untrusted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationRequest {
    pub op1: String,
    pub op2: String,
    pub operator: Operator,
}

impl CalculationRequest {
    pub fn new(op1: impl Into<String>, op2: impl Into<String>, operator: Operator) -> Self {
        Self {
            op1: op1.into(),
            op2: op2.into(),
            operator,
        }
    }

    /// Build a request from the three raw form strings.
    pub fn from_tokens(op1: impl Into<String>, op2: impl Into<String>, operator: &str) -> Self {
        Self::new(op1, op2, Operator::from_token(operator))
    }
}

/// Exact result of a successful calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationResult {
    pub value: BigInt,
}

impl CalculationResult {
    #[must_use]
    pub fn new(value: BigInt) -> Self {
        Self { value }
    }

    /// Canonical base-10 rendering: no leading zeros, `-` only when negative.
    #[must_use]
    pub fn to_decimal(&self) -> String {
        self.value.to_str_radix(10)
    }
}

impl fmt::Display for CalculationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

/// Value of the form's result field: the decimal result, or empty on any error.
#[must_use]
pub fn result_field(outcome: &Result<CalculationResult, CalculatorError>) -> String {
    outcome
        .as_ref()
        .map(CalculationResult::to_decimal)
        .unwrap_or_default()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn tokens_match_exactly() {
        assert_eq!(Operator::from_token("add"), Operator::Add);
        assert_eq!(Operator::from_token("sub"), Operator::Sub);
        assert_eq!(Operator::from_token("multi"), Operator::Multi);
        assert_eq!(Operator::from_token("div"), Operator::Div);

        for token in ["ADD", "Add", " add", "mul", "", "xyz", "div "] {
            assert_eq!(
                Operator::from_token(token),
                Operator::Unrecognized,
                "token {token:?}"
            );
        }
    }

    #[test]
    fn supported_tokens_round_trip() {
        for op in Operator::SUPPORTED {
            assert_eq!(Operator::from(op.token()), op);
        }
        assert_eq!(Operator::Unrecognized.token(), "");
        assert_eq!(Operator::Unrecognized.to_string(), "unrecognized");
    }

    #[test]
    fn request_from_tokens() {
        let req = CalculationRequest::from_tokens("1", "2", "multi");
        assert_eq!(req.op1, "1");
        assert_eq!(req.op2, "2");
        assert_eq!(req.operator, Operator::Multi);
    }

    #[test]
    fn result_field_is_empty_on_error() {
        let ok = Ok(CalculationResult::new(BigInt::from(-42)));
        assert_eq!(result_field(&ok), "-42");

        let err = Err(CalculatorError::DivideByZero);
        assert_eq!(result_field(&err), "");
    }

    #[test]
    fn decimal_rendering_is_canonical() {
        assert_eq!(CalculationResult::new(BigInt::from(0)).to_decimal(), "0");
        assert_eq!(CalculationResult::new(BigInt::from(-0)).to_string(), "0");
    }
}

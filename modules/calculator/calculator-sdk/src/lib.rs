//! Calculator SDK
//!
//! This crate provides everything needed to consume the calculator service:
//! - API trait (`CalculatorClientV1`)
//! - Models (`Operator`, `CalculationRequest`, `CalculationResult`)
//! - Error types (`CalculatorError`, `ParseFailure`)
//!
//! ## Usage
//!
//! ```ignore
//! use calculator_sdk::{CalculationRequest, CalculatorClientV1};
//!
//! let req = CalculationRequest::from_tokens("7", "2", "div");
//! let result = client.evaluate(&req).await?;
//! assert_eq!(result.to_decimal(), "3");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

mod api;
mod errors;
mod models;

pub use api::CalculatorClientV1;
pub use errors::{CalculatorError, ParseFailure};
pub use models::{CalculationRequest, CalculationResult, OperandPosition, Operator, result_field};

/// Re-exported so consumers can work with results without a direct dependency.
pub use num_bigint::BigInt;

//! Calculator Module
//!
//! Evaluates `op1 <operator> op2` on arbitrary-precision integers and serves
//! the result over an HTML form (`/calc`) and a JSON endpoint
//! (`/calculator/v1/evaluate`).
//!
//! ## Architecture
//!
//! - `domain/service.rs` - operand parsing and operator dispatch
//! - `local_client.rs` - `CalculatorClientV1` over the domain service
//! - `api/rest/` - handlers, DTOs, HTML view, error mapping
//! - `module.rs` - configuration and route registration
//!
//! External consumers should use the `calculator-sdk` crate types.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub use calculator_sdk::{
    CalculationRequest, CalculationResult, CalculatorClientV1, CalculatorError, Operator,
};

// === MODULE DEFINITION ===
mod module;
pub use module::CalculatorModule;

// === ERROR CATALOG ===
pub mod errors;

// === LOCAL CLIENT ===
pub mod local_client;

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;

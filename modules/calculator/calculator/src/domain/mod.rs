//! Domain layer for calculator module
//!
//! Contains operand parsing and arithmetic dispatch.

pub mod service;

pub use service::{Service, apply, parse_operand};

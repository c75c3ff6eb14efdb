pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod view;

pub use routes::{ApiState, CalculatorApiDoc, register_routes};

//! HTTP host for bigcalc.
//!
//! Modules contribute plain axum routes; the gateway adds `/health`, wraps
//! everything in the shared middleware stack and runs the server loop until
//! the cancellation token fires.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod middleware;
mod server;
mod web;

pub use server::{
    GatewayError, apply_middleware_stack, bind, build_router, serve, serve_on,
};
pub use web::health_check;

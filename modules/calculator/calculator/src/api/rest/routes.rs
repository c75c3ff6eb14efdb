//! Route registration for calculator module

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};
use calc_errors::Problem;
use calculator_sdk::CalculatorClientV1;
use utoipa::OpenApi;

use super::dto::{EvaluateRequest, EvaluateResponse};
use super::handlers;

/// Shared state injected into every calculator handler.
#[derive(Clone)]
pub struct ApiState {
    pub client: Arc<dyn CalculatorClientV1>,
    /// Page title shown on the HTML form
    pub title: String,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Calculator API", description = "Arbitrary-precision integer arithmetic"),
    paths(handlers::evaluate),
    components(schemas(EvaluateRequest, EvaluateResponse, Problem)),
    tags((name = "calculator", description = "Binary operations on big integers"))
)]
pub struct CalculatorApiDoc;

/// Register all REST routes for the calculator module.
///
/// # Arguments
/// * `router` - Axum router to add routes to
/// * `state` - Client and presentation settings shared by handlers
#[must_use]
pub fn register_routes(router: Router, state: ApiState) -> Router {
    let routes = Router::new()
        // GET|POST /calc - HTML form
        .route("/calc", get(handlers::calc_page).post(handlers::calc_page))
        // POST /calculator/v1/evaluate - JSON evaluation
        .route("/calculator/v1/evaluate", post(handlers::evaluate))
        .route("/calculator/v1/openapi.json", get(handlers::openapi_json))
        .layer(Extension(state));

    router.merge(routes)
}

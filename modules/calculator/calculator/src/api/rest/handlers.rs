//! REST handlers for the calculator module.

use axum::Json;
use axum::extract::rejection::FormRejection;
use axum::extract::{Extension, Form, OriginalUri};
use axum::http::HeaderMap;
use axum::response::Html;
use calc_errors::Problem;
use calculator_sdk::{CalculationRequest, result_field};
use tracing::debug;
use utoipa::OpenApi;

use super::dto::{CalcForm, EvaluateRequest, EvaluateResponse};
use super::error::calculator_error_to_problem;
use super::routes::{ApiState, CalculatorApiDoc};
use super::view::CalcPage;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// GET|POST /calc
///
/// Render the calculator page. Undecodable input is treated as an empty form,
/// and evaluation failures leave the result field empty.
pub async fn calc_page(
    Extension(state): Extension<ApiState>,
    form: Result<Form<CalcForm>, FormRejection>,
) -> Html<String> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(e) => {
            debug!(error = %e, "calculator form not decodable, rendering empty form");
            CalcForm::default()
        }
    };

    let request = CalculationRequest::from_tokens(form.op1.as_str(), form.op2.as_str(), &form.op);
    let outcome = state.client.evaluate(&request).await;
    if let Err(e) = &outcome {
        debug!(error = %e, "calculation failed");
    }
    let result = result_field(&outcome);

    Html(
        CalcPage {
            title: &state.title,
            op1: &form.op1,
            op2: &form.op2,
            op: &form.op,
            result: &result,
        }
        .render(),
    )
}

/// POST /calculator/v1/evaluate
///
/// Evaluate one binary operation and return the canonical decimal result.
#[utoipa::path(
    post,
    path = "/calculator/v1/evaluate",
    request_body = EvaluateRequest,
    responses(
        (status = 200, description = "Exact result", body = EvaluateResponse),
        (status = 400, description = "An operand is not a base-10 integer", body = Problem, content_type = "application/problem+json"),
        (status = 422, description = "Division by zero", body = Problem, content_type = "application/problem+json"),
    ),
    tag = "calculator"
)]
pub async fn evaluate(
    Extension(state): Extension<ApiState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, Problem> {
    let request = CalculationRequest::from_tokens(req.op1.as_str(), req.op2.as_str(), &req.op);

    match state.client.evaluate(&request).await {
        Ok(value) => Ok(Json(EvaluateResponse {
            result: value.to_decimal(),
            op1: req.op1,
            op2: req.op2,
            op: req.op,
        })),
        Err(e) => {
            debug!(error = %e, "evaluate rejected");
            let request_id = headers
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(ToOwned::to_owned);
            Err(calculator_error_to_problem(&e, uri.path(), request_id))
        }
    }
}

/// GET /calculator/v1/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(CalculatorApiDoc::openapi())
}

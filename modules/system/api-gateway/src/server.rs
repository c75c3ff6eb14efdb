//! Router assembly and the HTTP server loop.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::get;
use calc_bootstrap::ServerConfig;
use http::StatusCode;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::field::Empty;

use crate::middleware::request_id;
use crate::web;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid bind address '{addr}'")]
    InvalidBindAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("failed to bind {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP server error")]
    Serve(#[source] std::io::Error),
}

fn apply_trace_layer(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &http::Request<axum::body::Body>| {
                let rid = req
                    .headers()
                    .get(request_id::header())
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");

                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    version = ?req.version(),
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(
                |res: &http::Response<axum::body::Body>, latency: Duration, span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                    tracing::debug!(parent: span, "response sent");
                },
            ),
    )
}

/// Apply the middleware stack to a router.
///
/// Layers are registered innermost first. At runtime requests flow from the
/// outermost layer inwards:
/// `SetRequestId` → `PropagateRequestId` → Trace → `push_req_id_to_extensions`
/// → Timeout → `BodyLimit` → Router.
#[must_use]
pub fn apply_middleware_stack(mut router: Router, config: &ServerConfig) -> Router {
    // 5) Body limit
    router = router.layer(RequestBodyLimitLayer::new(config.body_limit_bytes));
    router = router.layer(DefaultBodyLimit::max(config.body_limit_bytes));

    // 4) Timeout
    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        Duration::from_millis(config.request_timeout_ms),
    ));

    // 3) Record request_id into span + extensions
    router = router.layer(from_fn(request_id::push_req_id_to_extensions));

    // 2) Trace
    router = apply_trace_layer(router);

    // 1) Request id: propagate to the response, generate when absent (outermost)
    let x_request_id = request_id::header();
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
    router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId))
}

/// Add the health endpoint to the module routes and wrap everything in the
/// middleware stack.
#[must_use]
pub fn build_router(routes: Router, config: &ServerConfig) -> Router {
    let router = routes.route("/health", get(web::health_check));
    apply_middleware_stack(router, config)
}

/// Parse `bind_addr` and bind a listener on it.
///
/// # Errors
/// Returns [`GatewayError`] if the address is malformed or already in use.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, GatewayError> {
    let addr: SocketAddr =
        config
            .bind_addr
            .parse()
            .map_err(|source| GatewayError::InvalidBindAddress {
                addr: config.bind_addr.clone(),
                source,
            })?;

    TcpListener::bind(addr)
        .await
        .map_err(|source| GatewayError::Bind { addr, source })
}

/// Serve `router` on an already bound listener until `cancel` fires.
///
/// # Errors
/// Returns [`GatewayError::Serve`] if the accept loop fails.
pub async fn serve_on(
    listener: TcpListener,
    router: Router,
    cancel: CancellationToken,
) -> Result<(), GatewayError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("HTTP server bound on {}", addr);
    }

    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully (cancellation)");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(GatewayError::Serve)
}

/// Bind `config.bind_addr` and serve until `cancel` fires.
///
/// # Errors
/// Returns [`GatewayError`] on bind or serve failure.
pub async fn serve(
    router: Router,
    config: &ServerConfig,
    cancel: CancellationToken,
) -> Result<(), GatewayError> {
    let listener = bind(config).await?;
    serve_on(listener, router, cancel).await
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_rejects_malformed_address() {
        let config = ServerConfig {
            bind_addr: "localhost-8080".to_owned(),
            ..ServerConfig::default()
        };
        let err = bind(&config).await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidBindAddress { .. }));
        assert_eq!(err.to_string(), "invalid bind address 'localhost-8080'");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[tokio::test]
    async fn bind_accepts_ephemeral_port() {
        let config = ServerConfig {
            bind_addr: "127.0.0.1:0".to_owned(),
            ..ServerConfig::default()
        };
        let listener = bind(&config).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }
}

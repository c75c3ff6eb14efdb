#![allow(clippy::expect_used)]

//! Runs the real server loop on an ephemeral port and drives it over TCP.

use std::time::Duration;

use anyhow::Result;
use axum::Router;
use calc_bootstrap::ServerConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn serves_health_and_stops_on_cancel() -> Result<()> {
    let config = ServerConfig {
        bind_addr: "127.0.0.1:0".to_owned(),
        ..ServerConfig::default()
    };
    let listener = api_gateway::bind(&config).await?;
    let addr = listener.local_addr()?;

    let cancel = CancellationToken::new();
    let router = api_gateway::build_router(Router::new(), &config);
    let server = tokio::spawn(api_gateway::serve_on(listener, router, cancel.clone()));

    let mut stream = TcpStream::connect(addr).await?;
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await?;
    let mut response = String::new();
    stream.read_to_string(&mut response).await?;

    assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
    assert!(response.to_ascii_lowercase().contains("x-request-id:"));
    assert!(response.contains(r#"{"status":"ok"}"#));

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server must stop after cancellation")??;
    Ok(())
}

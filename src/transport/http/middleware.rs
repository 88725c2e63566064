//! Request logging middleware.

use axum::extract::{ConnectInfo, Request};
use axum::middleware::Next;
use axum::response::Response;
use std::net::SocketAddr;

/// Logs one line per request: method, path, client IP and response status.
///
/// The IP comes from the `ConnectInfo` extension and falls back to `-` when
/// the router is driven without a real socket (tests).
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string());

    let response = next.run(req).await;

    tracing::info!(
        %method,
        %path,
        %ip,
        status = response.status().as_u16(),
        "request"
    );
    response
}

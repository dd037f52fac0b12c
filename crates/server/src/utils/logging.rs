use axum::{extract::Request, middleware::Next, response::Response};
use log::{info, warn};
use std::time::Instant;

/// Logs one line per request with its status and latency
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed = started.elapsed();

    if status.is_server_error() {
        warn!("{method} {uri} -> {status} in {elapsed:?}");
    } else {
        info!("{method} {uri} -> {status} in {elapsed:?}");
    }

    response
}

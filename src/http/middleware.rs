use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

pub async fn tracing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let start_time = Instant::now();
    let response = next.run(request).await;
    let processing_time_us = start_time.elapsed().as_micros() as u64;

    tracing::info!(
        task = "http_request",
        http_method = %method,
        endpoint = %path,
        status = response.status().as_u16(),
        processing_time_us,
    );

    response
}

use crate::cli::Args;
use axum::http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;

pub fn layer(args: &Args) -> CorsLayer {
    let origins = args
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid allowed origin `{origin}`.");
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::OPTIONS])
}

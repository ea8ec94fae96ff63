use crate::app_context::AppContext;
use crate::cli::Args;
use crate::http::{cors, middleware};
use crate::{health, racers};
use axum::{routing::get, Router};

pub fn new(args: &Args, app_context: AppContext) -> Router {
    let cors_policy = cors::layer(args);
    tracing::info!("Initialized HTTP configuration.");

    let health_routes = Router::new().route("/check", get(health::handlers::healthcheck));
    let race_routes = Router::new()
        .route("/status", get(racers::handlers::status::status))
        .route("/ws", get(racers::handlers::ws::ws));

    Router::new()
        .nest("/health", health_routes)
        .nest("/race", race_routes)
        .with_state(app_context)
        .layer(cors_policy)
        .layer(axum::middleware::from_fn(middleware::tracing))
}

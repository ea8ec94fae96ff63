use crate::app_context::AppContext;
use crate::racers::responses::RaceStatusResponse;
use axum::extract::State;
use axum::response::Json;

#[axum::debug_handler]
pub async fn status(State(app_context): State<AppContext>) -> Json<RaceStatusResponse> {
    let snapshot = app_context.tracker.snapshot().await;
    Json(RaceStatusResponse {
        error: false,
        local_racer: snapshot.local_racer,
        racers: snapshot.racers,
        destination: snapshot.destination,
        arrived: snapshot.arrived,
    })
}

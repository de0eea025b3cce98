use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;

use crate::state::AppState;
use crate::tracker::dto::{AnalyzeRequest, PanelRequest, TrackerSnapshot};
use crate::tracker::services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/state", get(get_state))
        .route("/panel", put(set_panel))
}

#[instrument(skip(state, body), fields(query = %body.query))]
async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> Json<TrackerSnapshot> {
    Json(services::submit(&state, &body.query).await)
}

#[instrument(skip(state))]
async fn get_state(State(state): State<AppState>) -> Json<TrackerSnapshot> {
    Json(services::snapshot(&state).await)
}

#[instrument(skip(state))]
async fn set_panel(
    State(state): State<AppState>,
    Json(body): Json<PanelRequest>,
) -> Json<TrackerSnapshot> {
    Json(services::set_panel(&state, body.open).await)
}

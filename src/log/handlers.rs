use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::log::dto::LogResponse;
use crate::state::AppState;
use crate::tracker::dto::TrackerSnapshot;
use crate::tracker::services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/log", get(get_log).post(add_to_log).delete(reset_log))
        .route("/log/:id", delete(remove_entry))
}

#[instrument(skip(state))]
async fn get_log(State(state): State<AppState>) -> Json<LogResponse> {
    let snapshot = services::snapshot(&state).await;
    Json(LogResponse {
        totals: snapshot.totals,
        entries: snapshot.daily_log,
    })
}

/// Commits the current unsaved result. A plain 200 means there was nothing
/// to add.
#[instrument(skip(state))]
async fn add_to_log(State(state): State<AppState>) -> (StatusCode, Json<TrackerSnapshot>) {
    let (added, snapshot) = services::commit(&state).await;
    let status = if added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    (status, Json(snapshot))
}

#[instrument(skip(state))]
async fn remove_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Json<TrackerSnapshot> {
    Json(services::remove(&state, id).await)
}

#[instrument(skip(state))]
async fn reset_log(State(state): State<AppState>) -> Json<TrackerSnapshot> {
    Json(services::reset(&state).await)
}

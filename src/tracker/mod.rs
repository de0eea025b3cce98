pub mod controller;
pub mod dto;
pub mod handlers;
pub mod services;

pub use controller::Tracker;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::router()
}

pub(crate) mod dto;
pub mod handlers;
mod store;

pub use dto::{LogEntry, LogTotals};
pub use store::{FileStore, MemoryStore, SessionStore};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::router()
}

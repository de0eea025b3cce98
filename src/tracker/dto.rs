use serde::{Deserialize, Serialize};

use crate::log::{LogEntry, LogTotals};
use crate::nutrition::NutritionRecord;
use crate::tracker::controller::Tracker;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct PanelRequest {
    pub open: bool,
}

/// Full controller state as one response body, mirroring what the UI renders.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSnapshot {
    pub query: String,
    pub loading: bool,
    pub error: Option<String>,
    pub current_result: Option<NutritionRecord>,
    pub daily_log: Vec<LogEntry>,
    pub panel_open: bool,
    pub totals: LogTotals,
}

impl TrackerSnapshot {
    pub fn of(tracker: &Tracker) -> Self {
        Self {
            query: tracker.query.clone(),
            loading: tracker.loading,
            error: tracker.error.clone(),
            current_result: tracker.current_result.clone(),
            daily_log: tracker.daily_log.clone(),
            panel_open: tracker.panel_open,
            totals: tracker.totals(),
        }
    }
}

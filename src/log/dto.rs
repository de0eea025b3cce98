use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::nutrition::NutritionRecord;

/// A nutrition record committed to the daily log. Flattening keeps the stored
/// JSON shape identical to the record plus the log-only fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: Uuid,
    /// Capture time, epoch milliseconds.
    pub timestamp: i64,
    pub quantity: u32,
    #[serde(flatten)]
    pub nutrition: NutritionRecord,
}

impl LogEntry {
    /// Commits a record: fresh id, capture time now, quantity fixed at 1.
    pub fn commit(nutrition: NutritionRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: now_millis(),
            quantity: 1,
            nutrition,
        }
    }
}

fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Aggregate macros over the whole log. Derived on demand, never stored.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
}

impl LogTotals {
    pub fn of(entries: &[LogEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut acc, e| {
            acc.calories += e.nutrition.calories;
            acc.protein += e.nutrition.protein;
            acc.carbohydrates += e.nutrition.carbohydrates;
            acc.fat += e.nutrition.fat;
            acc
        })
    }
}

/// Body of `GET /log`: the full log plus its derived totals.
#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub entries: Vec<LogEntry>,
    pub totals: LogTotals,
}

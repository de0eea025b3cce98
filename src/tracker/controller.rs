use crate::log::{LogEntry, LogTotals};
use crate::nutrition::{AnalyzeError, NutritionRecord};
use tracing::error;
use uuid::Uuid;

/// The one message users ever see for a failed analysis, whatever the cause.
pub const FETCH_ERROR_MSG: &str =
    "Could not fetch nutrition data. Please check your connection and API key.";

/// UI state plus the daily log. All transitions are synchronous and pure;
/// the async orchestration (network call, persistence) lives in
/// [`super::services`].
pub struct Tracker {
    pub query: String,
    pub loading: bool,
    pub error: Option<String>,
    pub current_result: Option<NutritionRecord>,
    pub daily_log: Vec<LogEntry>,
    pub panel_open: bool,
    /// Sequence number of the most recently initiated submit. Completions
    /// carrying an older number are stale and get discarded, so the latest
    /// initiated query always wins the `current_result` slot.
    issued: u64,
}

impl Tracker {
    pub fn new(daily_log: Vec<LogEntry>) -> Self {
        Self {
            query: String::new(),
            loading: false,
            error: None,
            current_result: None,
            daily_log,
            panel_open: false,
            issued: 0,
        }
    }

    /// Starts a submit. A whitespace-only query is ignored and `None` is
    /// returned, meaning no call should be made at all.
    pub fn begin_submit(&mut self, query: &str) -> Option<u64> {
        if query.trim().is_empty() {
            return None;
        }
        self.query = query.to_string();
        self.loading = true;
        self.error = None;
        self.issued += 1;
        Some(self.issued)
    }

    /// Applies the outcome of the submit tagged `seq`. On failure the
    /// previous `current_result` is kept and only the generic message is
    /// surfaced.
    pub fn finish_submit(&mut self, seq: u64, outcome: Result<NutritionRecord, AnalyzeError>) {
        if seq != self.issued {
            // A newer submit superseded this one while it was in flight.
            return;
        }
        match outcome {
            Ok(record) => {
                self.current_result = Some(record);
            }
            Err(e) => {
                error!(error = %e, "nutrition analysis failed");
                self.error = Some(FETCH_ERROR_MSG.to_string());
            }
        }
        self.loading = false;
    }

    /// Moves the current result into the log. Returns whether anything
    /// changed (the caller persists only then).
    pub fn commit(&mut self) -> bool {
        let Some(record) = self.current_result.take() else {
            return false;
        };
        let first_entry = self.daily_log.is_empty();
        self.daily_log.insert(0, LogEntry::commit(record));
        self.query.clear();
        if first_entry {
            self.panel_open = true;
        }
        true
    }

    /// Drops the entry with the given id; unknown ids change nothing.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.daily_log.len();
        self.daily_log.retain(|e| e.id != id);
        self.daily_log.len() != before
    }

    /// Clears the whole log. No confirmation, no undo.
    pub fn reset(&mut self) -> bool {
        if self.daily_log.is_empty() {
            return false;
        }
        self.daily_log.clear();
        true
    }

    pub fn set_panel(&mut self, open: bool) {
        self.panel_open = open;
    }

    pub fn totals(&self) -> LogTotals {
        LogTotals::of(&self.daily_log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::dto::test_support::record;

    #[test]
    fn whitespace_query_is_ignored() {
        let mut t = Tracker::new(Vec::new());
        assert_eq!(t.begin_submit("   "), None);
        assert!(!t.loading);
        assert!(t.query.is_empty());
    }

    #[test]
    fn successful_submit_stores_current_result() {
        let mut t = Tracker::new(Vec::new());
        let seq = t.begin_submit("2 boiled eggs").unwrap();
        assert!(t.loading);
        t.finish_submit(seq, Ok(record("Boiled Eggs", 156.0)));
        assert!(!t.loading);
        assert_eq!(t.error, None);
        assert_eq!(t.current_result.as_ref().unwrap().food_name, "Boiled Eggs");
    }

    #[test]
    fn failed_submit_sets_generic_message_and_keeps_previous_result() {
        let mut t = Tracker::new(Vec::new());
        let seq = t.begin_submit("an apple").unwrap();
        t.finish_submit(seq, Ok(record("Apple", 95.0)));

        let seq = t.begin_submit("something else").unwrap();
        t.finish_submit(seq, Err(AnalyzeError::EmptyResponse));
        assert_eq!(t.error.as_deref(), Some(FETCH_ERROR_MSG));
        assert_eq!(t.current_result.as_ref().unwrap().food_name, "Apple");
        assert!(!t.loading);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut t = Tracker::new(Vec::new());
        let first = t.begin_submit("eggs").unwrap();
        let second = t.begin_submit("apple").unwrap();

        t.finish_submit(second, Ok(record("Apple", 95.0)));
        // The slower, older call must not overwrite the newer result.
        t.finish_submit(first, Ok(record("Boiled Eggs", 156.0)));
        assert_eq!(t.current_result.as_ref().unwrap().food_name, "Apple");
        assert!(!t.loading);
    }

    #[test]
    fn commit_prepends_one_entry_with_unique_id() {
        let mut t = Tracker::new(Vec::new());
        let seq = t.begin_submit("eggs").unwrap();
        t.finish_submit(seq, Ok(record("Boiled Eggs", 156.0)));
        assert!(t.commit());

        let seq = t.begin_submit("apple").unwrap();
        t.finish_submit(seq, Ok(record("Apple", 95.0)));
        assert!(t.commit());

        assert_eq!(t.daily_log.len(), 2);
        assert_eq!(t.daily_log[0].nutrition.food_name, "Apple");
        assert_ne!(t.daily_log[0].id, t.daily_log[1].id);
        assert_eq!(t.daily_log[0].quantity, 1);
        assert!(t.current_result.is_none());
        assert!(t.query.is_empty());
    }

    #[test]
    fn commit_without_result_is_a_noop() {
        let mut t = Tracker::new(Vec::new());
        assert!(!t.commit());
        assert!(t.daily_log.is_empty());
    }

    #[test]
    fn first_commit_opens_the_panel() {
        let mut t = Tracker::new(Vec::new());
        t.current_result = Some(record("Eggs", 156.0));
        t.commit();
        assert!(t.panel_open);
    }

    #[test]
    fn remove_drops_only_the_matching_entry() {
        let mut t = Tracker::new(vec![
            LogEntry::commit(record("Eggs", 156.0)),
            LogEntry::commit(record("Apple", 95.0)),
            LogEntry::commit(record("Rice", 206.0)),
        ]);
        let target = t.daily_log[1].id;
        assert!(t.remove(target));
        assert_eq!(t.daily_log.len(), 2);
        assert_eq!(t.daily_log[0].nutrition.food_name, "Eggs");
        assert_eq!(t.daily_log[1].nutrition.food_name, "Rice");
    }

    #[test]
    fn remove_of_unknown_id_is_a_noop() {
        let mut t = Tracker::new(vec![LogEntry::commit(record("Eggs", 156.0))]);
        assert!(!t.remove(Uuid::new_v4()));
        assert_eq!(t.daily_log.len(), 1);
    }

    #[test]
    fn reset_always_empties_the_log() {
        let mut t = Tracker::new(vec![
            LogEntry::commit(record("Eggs", 156.0)),
            LogEntry::commit(record("Apple", 95.0)),
        ]);
        assert!(t.reset());
        assert!(t.daily_log.is_empty());
        assert!(!t.reset());
    }

    #[test]
    fn boiled_eggs_scenario() {
        let mut t = Tracker::new(Vec::new());
        let before = t.totals().calories;
        let seq = t.begin_submit("2 boiled eggs").unwrap();
        t.finish_submit(seq, Ok(record("Boiled Eggs", 156.0)));
        t.commit();
        assert_eq!(t.daily_log[0].nutrition.food_name, "Boiled Eggs");
        assert_eq!(t.daily_log[0].quantity, 1);
        assert_eq!(t.totals().calories, before + 156.0);
    }
}

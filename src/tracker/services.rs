use tracing::warn;
use uuid::Uuid;

use crate::state::AppState;
use crate::tracker::controller::Tracker;
use crate::tracker::dto::TrackerSnapshot;

/// Submit transition. The upstream call is awaited without holding the
/// tracker lock, so the rest of the API stays responsive while an analysis
/// is in flight and overlapping submits remain possible; the sequence tag
/// picked up in `begin_submit` decides which completion lands.
pub async fn submit(state: &AppState, query: &str) -> TrackerSnapshot {
    let seq = state.tracker.lock().await.begin_submit(query);
    let Some(seq) = seq else {
        return snapshot(state).await;
    };

    let outcome = state.analyzer.analyze(query).await;

    let mut tracker = state.tracker.lock().await;
    tracker.finish_submit(seq, outcome);
    TrackerSnapshot::of(&tracker)
}

/// Commit transition. Returns whether an entry was actually added.
pub async fn commit(state: &AppState) -> (bool, TrackerSnapshot) {
    let mut tracker = state.tracker.lock().await;
    let added = tracker.commit();
    if added {
        persist(state, &tracker).await;
    }
    (added, TrackerSnapshot::of(&tracker))
}

pub async fn remove(state: &AppState, id: Uuid) -> TrackerSnapshot {
    let mut tracker = state.tracker.lock().await;
    if tracker.remove(id) {
        persist(state, &tracker).await;
    }
    TrackerSnapshot::of(&tracker)
}

pub async fn reset(state: &AppState) -> TrackerSnapshot {
    let mut tracker = state.tracker.lock().await;
    if tracker.reset() {
        persist(state, &tracker).await;
    }
    TrackerSnapshot::of(&tracker)
}

pub async fn set_panel(state: &AppState, open: bool) -> TrackerSnapshot {
    let mut tracker = state.tracker.lock().await;
    tracker.set_panel(open);
    TrackerSnapshot::of(&tracker)
}

pub async fn snapshot(state: &AppState) -> TrackerSnapshot {
    TrackerSnapshot::of(&*state.tracker.lock().await)
}

/// Persisted under the tracker lock so the durable copy always reflects the
/// in-memory sequence once the mutation returns. Failures are diagnostics
/// only; the user never sees them.
async fn persist(state: &AppState, tracker: &Tracker) {
    if let Err(e) = state.store.persist(&tracker.daily_log).await {
        warn!(error = %e, "could not persist daily log");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::log::dto::test_support::record;
    use crate::log::MemoryStore;
    use crate::nutrition::{AnalyzeError, NutritionAnalyzer, NutritionRecord};
    use crate::tracker::controller::FETCH_ERROR_MSG;

    struct FixedAnalyzer(NutritionRecord);

    #[async_trait]
    impl NutritionAnalyzer for FixedAnalyzer {
        async fn analyze(&self, _description: &str) -> Result<NutritionRecord, AnalyzeError> {
            Ok(self.0.clone())
        }
    }

    struct FailingAnalyzer;

    #[async_trait]
    impl NutritionAnalyzer for FailingAnalyzer {
        async fn analyze(&self, _description: &str) -> Result<NutritionRecord, AnalyzeError> {
            Err(AnalyzeError::EmptyResponse)
        }
    }

    fn state_with(analyzer: Arc<dyn NutritionAnalyzer>) -> (AppState, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let state = AppState::from_parts(analyzer, store.clone(), Vec::new());
        (state, store)
    }

    #[tokio::test]
    async fn submit_and_commit_reach_the_store() {
        let (state, store) = state_with(Arc::new(FixedAnalyzer(record("Boiled Eggs", 156.0))));

        let snap = submit(&state, "2 boiled eggs").await;
        assert_eq!(snap.current_result.as_ref().unwrap().food_name, "Boiled Eggs");
        assert!(!snap.loading);

        let (added, snap) = commit(&state).await;
        assert!(added);
        assert_eq!(snap.daily_log.len(), 1);
        assert_eq!(snap.totals.calories, 156.0);

        let stored = store.snapshot().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].nutrition.food_name, "Boiled Eggs");
    }

    #[tokio::test]
    async fn failed_submit_surfaces_only_the_generic_message() {
        let (state, store) = state_with(Arc::new(FailingAnalyzer));
        let snap = submit(&state, "mystery meat").await;
        assert_eq!(snap.error.as_deref(), Some(FETCH_ERROR_MSG));
        assert!(snap.current_result.is_none());
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn whitespace_submit_makes_no_call_and_changes_nothing() {
        let (state, _) = state_with(Arc::new(FailingAnalyzer));
        let snap = submit(&state, "   ").await;
        assert!(snap.query.is_empty());
        assert!(!snap.loading);
        assert_eq!(snap.error, None);
    }

    #[tokio::test]
    async fn remove_and_reset_rewrite_the_store() {
        let (state, store) = state_with(Arc::new(FixedAnalyzer(record("Apple", 95.0))));
        submit(&state, "an apple").await;
        commit(&state).await;
        submit(&state, "another apple").await;
        commit(&state).await;
        assert_eq!(store.snapshot().await.len(), 2);

        let id = store.snapshot().await[1].id;
        let snap = remove(&state, id).await;
        assert_eq!(snap.daily_log.len(), 1);
        assert_eq!(store.snapshot().await.len(), 1);

        let snap = reset(&state).await;
        assert!(snap.daily_log.is_empty());
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn commit_without_result_does_not_touch_the_store() {
        let (state, store) = state_with(Arc::new(FailingAnalyzer));
        let (added, _) = commit(&state).await;
        assert!(!added);
        assert!(store.snapshot().await.is_empty());
    }
}

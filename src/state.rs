use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::config::AppConfig;
use crate::log::{FileStore, LogEntry, MemoryStore, SessionStore};
use crate::nutrition::{GeminiClient, NutritionAnalyzer};
use crate::tracker::Tracker;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<dyn NutritionAnalyzer>,
    pub store: Arc<dyn SessionStore>,
    pub tracker: Arc<Mutex<Tracker>>,
}

impl AppState {
    /// Wires the real analyzer and file store and seeds the tracker from
    /// disk. The stored log is read exactly once, here.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let analyzer = Arc::new(GeminiClient::new(&config.gemini)) as Arc<dyn NutritionAnalyzer>;
        let store =
            Arc::new(FileStore::new(config.log_path.clone())) as Arc<dyn SessionStore>;

        let entries = store.load().await;
        info!(entries = entries.len(), path = %config.log_path.display(), "daily log restored");

        Ok(Self::from_parts(analyzer, store, entries))
    }

    pub fn from_parts(
        analyzer: Arc<dyn NutritionAnalyzer>,
        store: Arc<dyn SessionStore>,
        entries: Vec<LogEntry>,
    ) -> Self {
        Self {
            analyzer,
            store,
            tracker: Arc::new(Mutex::new(Tracker::new(entries))),
        }
    }

    /// State with a volatile store and an analyzer that always fails, for
    /// tests that do not care about the upstream call.
    pub fn fake() -> Self {
        use async_trait::async_trait;

        use crate::nutrition::{AnalyzeError, NutritionRecord};

        struct OfflineAnalyzer;

        #[async_trait]
        impl NutritionAnalyzer for OfflineAnalyzer {
            async fn analyze(&self, _description: &str) -> Result<NutritionRecord, AnalyzeError> {
                Err(AnalyzeError::EmptyResponse)
            }
        }

        Self::from_parts(
            Arc::new(OfflineAnalyzer),
            Arc::new(MemoryStore::default()),
            Vec::new(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::controller::FETCH_ERROR_MSG;
    use crate::tracker::services;

    #[tokio::test]
    async fn fake_state_starts_empty_and_offline() {
        let state = AppState::fake();
        let snap = services::snapshot(&state).await;
        assert!(snap.daily_log.is_empty());
        assert!(snap.current_result.is_none());

        let snap = services::submit(&state, "toast").await;
        assert_eq!(snap.error.as_deref(), Some(FETCH_ERROR_MSG));
    }
}

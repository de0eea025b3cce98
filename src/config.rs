use std::path::PathBuf;

use tracing::warn;

use crate::nutrition::gemini;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini: GeminiConfig,
    pub log_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        // A missing key is not a startup error: analysis calls simply fail
        // upstream and surface the generic message.
        let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            warn!("GEMINI_API_KEY is not set; every analysis call will fail");
        }
        let gemini = GeminiConfig {
            api_key,
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| gemini::DEFAULT_MODEL.into()),
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| gemini::DEFAULT_BASE_URL.into()),
        };
        let log_path = std::env::var("NUTRITRACK_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_log_path());
        Ok(Self { gemini, log_path })
    }
}

fn default_log_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".nutritrack")
        .join("log.json")
}

mod dto;
mod error;
pub mod gemini;

pub use dto::NutritionRecord;
pub use error::AnalyzeError;
pub use gemini::GeminiClient;

use async_trait::async_trait;

/// Seam between the controller and the upstream model, so transitions can be
/// exercised against a fake analyzer.
#[async_trait]
pub trait NutritionAnalyzer: Send + Sync {
    /// One blocking round trip: free-text food description in, structured
    /// nutrition estimate out. No retry, no caching.
    async fn analyze(&self, description: &str) -> Result<NutritionRecord, AnalyzeError>;
}

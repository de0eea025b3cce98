use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, instrument};

use crate::config::GeminiConfig;
use crate::nutrition::{AnalyzeError, NutritionAnalyzer, NutritionRecord};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Client for the Generative Language `generateContent` endpoint, asking the
/// model for a JSON document constrained by a response schema.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Declares the NutritionRecord shape to the model. Fiber and sugar are
    /// listed but left out of `required`.
    fn response_schema() -> serde_json::Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "foodName": { "type": "STRING" },
                "calories": { "type": "NUMBER" },
                "protein": { "type": "NUMBER" },
                "fat": { "type": "NUMBER" },
                "carbohydrates": { "type": "NUMBER" },
                "fiber": { "type": "NUMBER" },
                "sugar": { "type": "NUMBER" },
                "servingSize": { "type": "STRING" },
                "healthScore": { "type": "NUMBER" },
                "summary": { "type": "STRING" },
                "benefits": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": [
                "foodName", "calories", "protein", "fat", "carbohydrates",
                "servingSize", "healthScore", "summary", "benefits"
            ]
        })
    }

    fn build_request(description: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(format!(
                        "Analyze the nutritional content of: {description}. \
                         Provide precise estimates for a standard serving."
                    )),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Self::response_schema(),
            },
        }
    }

    /// Pulls the first candidate's text out of a response body.
    fn extract_text(response: GeminiResponse) -> Result<String, AnalyzeError> {
        if let Some(error) = response.error {
            return Err(AnalyzeError::Upstream {
                status: 200,
                body: error.message,
            });
        }
        let text = response
            .candidates
            .into_iter()
            .flatten()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(AnalyzeError::EmptyResponse);
        }
        Ok(text)
    }

    fn parse_record(text: &str) -> Result<NutritionRecord, AnalyzeError> {
        let record: NutritionRecord = serde_json::from_str(text)
            .map_err(|e| AnalyzeError::MalformedResponse(e.to_string()))?;
        record.validate().map_err(AnalyzeError::MalformedResponse)?;
        Ok(record)
    }
}

#[async_trait]
impl NutritionAnalyzer for GeminiClient {
    #[instrument(skip(self))]
    async fn analyze(&self, description: &str) -> Result<NutritionRecord, AnalyzeError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        debug!(model = %self.model, "requesting nutrition analysis");
        let response = self
            .client
            .post(&url)
            .json(&Self::build_request(description))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, "gemini api error");
            return Err(AnalyzeError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AnalyzeError::MalformedResponse(e.to_string()))?;
        let text = Self::extract_text(body)?;
        Self::parse_record(&text)
    }
}

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;

/// One generateContent submission: prompt text plus an inline document.
#[derive(Debug, Clone)]
pub struct ContentRequest {
    pub prompt: String,
    pub document_base64: String,
    pub mime_type: String,
    /// None leaves sampling at the model default (the fallback tier does this).
    pub temperature: Option<f32>,
}

/// Failure classes for a single provider call. Rate-limit and
/// model-not-found are the classes that qualify for the fallback tier.
#[derive(Debug, thiserror::Error)]
pub enum ProviderCallError {
    #[error("provider.rate_limited")]
    RateLimited,
    #[error("provider.model_not_found")]
    ModelNotFound,
    #[error("provider.empty_response")]
    EmptyResponse,
    #[error("provider.request_failed: {0}")]
    RequestFailed(String),
}

/// Transport abstraction over the Gemini generateContent endpoint.
/// Returns the generated text of the first candidate.
#[async_trait]
pub trait GenerateContent: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        request: &ContentRequest,
    ) -> Result<String, ProviderCallError>;
}

/// Shared Gemini HTTP client configuration.
pub struct GeminiClient {
    pub client: Client,
    pub api_key: String,
    pub base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

    /// Returns the generateContent endpoint URL for a model.
    pub fn generate_content_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl GenerateContent for GeminiClient {
    async fn generate(
        &self,
        model: &str,
        request: &ContentRequest,
    ) -> Result<String, ProviderCallError> {
        let mut generation_config = json!({ "responseMimeType": "application/json" });
        if let Some(temperature) = request.temperature {
            generation_config["temperature"] = json!(temperature);
        }

        let body = json!({
            "contents": [
                {
                    "parts": [
                        { "text": request.prompt },
                        {
                            "inlineData": {
                                "mimeType": request.mime_type,
                                "data": request.document_base64,
                            }
                        },
                    ]
                }
            ],
            "generationConfig": generation_config,
        });

        let response = self
            .client
            .post(self.generate_content_url(model))
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderCallError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(ProviderCallError::RateLimited),
            StatusCode::NOT_FOUND => return Err(ProviderCallError::ModelNotFound),
            status if !status.is_success() => {
                return Err(ProviderCallError::RequestFailed(format!(
                    "status {}",
                    status.as_u16()
                )));
            }
            _ => {}
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderCallError::RequestFailed(e.to_string()))?;

        data["candidates"]
            .as_array()
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate["content"]["parts"].as_array())
            .and_then(|parts| parts.iter().find_map(|part| part["text"].as_str()))
            .map(|text| text.to_string())
            .ok_or(ProviderCallError::EmptyResponse)
    }
}

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use crate::models::{GenerationRequest, GenerationResponse};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Transport behind the generation endpoint. Object-safe so hosts and
/// tests can substitute their own transport.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, ClientError>;
}

// Truncate embedded base64 payloads so request logs stay readable.
fn truncate_base64_in_json(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map.iter_mut() {
                if key == "inputImage" {
                    if let serde_json::Value::String(s) = val {
                        if s.len() > 100 {
                            // Cut on a char boundary; payloads are normally
                            // ASCII data URLs but the field is host-supplied.
                            let cut = s
                                .char_indices()
                                .nth(50)
                                .map(|(i, _)| i)
                                .unwrap_or(s.len());
                            *val = serde_json::Value::String(format!(
                                "{}...[truncated {} chars]",
                                &s[..cut],
                                s.len() - cut
                            ));
                        }
                    }
                } else {
                    truncate_base64_in_json(val);
                }
            }
        }
        serde_json::Value::Array(arr) => {
            for val in arr.iter_mut() {
                truncate_base64_in_json(val);
            }
        }
        _ => {}
    }
}

/// Default reqwest implementation: `POST {base_url}/generate` with the
/// wire-shaped request body and an optional bearer key.
pub struct HttpGenerationClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpGenerationClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Base URL from `SHOCKGEN_API_BASE` (default local dev server), key
    /// from `SHOCKGEN_API_KEY`.
    pub fn from_env() -> Self {
        let base_url = std::env::var("SHOCKGEN_API_BASE")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());
        Self::new(base_url, std::env::var("SHOCKGEN_API_KEY").ok())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ApiErrorMessage {
    message: String,
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, ClientError> {
        let url = format!("{}/generate", self.base_url);

        if let Ok(mut body) = serde_json::to_value(request) {
            truncate_base64_in_json(&mut body);
            info!("📤 Generation request to {}: {}", url, body);
        }

        let mut req = self.client.post(&url).json(request);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req
            .send()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("❌ Generation endpoint returned {}: {}", status, body);
            // Prefer the endpoint's human-readable message when it sends one.
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("status={status} body={body}"));
            return Err(ClientError::Api(message));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;
        let parsed: GenerationResponse =
            serde_json::from_str(&text).map_err(|e| ClientError::Parse(e.to_string()))?;

        info!("✅ Generation succeeded: {}", parsed.image_url);
        Ok(parsed)
    }
}

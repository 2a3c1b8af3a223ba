//! Hosted machine-translation backend

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::core::config::AppConfig;
use crate::core::errors::{PipelineError, Result};

/// Seam for the pretrained translation model
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate `text` with the resolved model, returning decoded output
    /// with special tokens already stripped by the hosted pipeline
    async fn translate(&self, text: &str, model_id: &str) -> Result<String>;
}

/// Translation backend calling the Hugging Face inference API
///
/// Model weights live on the hosted side; `wait_for_model` makes cold
/// starts block on the first request for a pair instead of failing.
#[derive(Debug, Clone)]
pub struct HfTranslator {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl HfTranslator {
    /// Create a translator from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.hf_endpoint.clone(),
            api_token: config.hf_api_token.clone(),
        })
    }
}

#[async_trait]
impl TranslationBackend for HfTranslator {
    async fn translate(&self, text: &str, model_id: &str) -> Result<String> {
        let url = format!("{}/models/{}", self.endpoint, model_id);

        let body = serde_json::json!({
            "inputs": text,
            "options": { "wait_for_model": true }
        });

        debug!("Translating with model {}", model_id);

        let mut request = self.client.post(&url).json(&body);
        if let Some(token) = &self.api_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| PipelineError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            let status_code = status.as_u16();
            let error_text = response.text().await.unwrap_or_default();

            // 503 means the hosted model failed to come up in time
            if status_code == 503 {
                return Err(PipelineError::ModelError {
                    model: model_id.to_string(),
                    message: error_text,
                });
            }

            return Err(PipelineError::ApiError {
                status: status_code,
                message: error_text,
            });
        }

        let json: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| PipelineError::InvalidResponseError {
                    message: e.to_string(),
                })?;

        let translation = json
            .get(0)
            .and_then(|item| item["translation_text"].as_str())
            .ok_or_else(|| PipelineError::InvalidResponseError {
                message: "No translation_text in response".to_string(),
            })?
            .to_string();

        Ok(translation)
    }
}

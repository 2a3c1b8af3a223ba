//! Reference-based translation quality scoring

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::core::config::AppConfig;
use crate::core::errors::{PipelineError, Result};

/// Seam for the learned quality metric
#[async_trait]
pub trait QualityScorer: Send + Sync {
    /// Similarity score between a reference and a candidate, in 0.0 - 1.0
    ///
    /// Empty inputs are passed through to the underlying metric unchanged.
    async fn score(&self, reference: &str, candidate: &str) -> Result<f64>;
}

/// Scorer backed by a hosted sentence-similarity model
#[derive(Debug, Clone)]
pub struct HfSimilarityScorer {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_token: Option<String>,
}

impl HfSimilarityScorer {
    /// Create a scorer from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.hf_endpoint.clone(),
            model: config.scorer_model.clone(),
            api_token: config.hf_api_token.clone(),
        })
    }
}

#[async_trait]
impl QualityScorer for HfSimilarityScorer {
    async fn score(&self, reference: &str, candidate: &str) -> Result<f64> {
        let url = format!("{}/models/{}", self.endpoint, self.model);

        let body = serde_json::json!({
            "inputs": {
                "source_sentence": reference,
                "sentences": [candidate]
            },
            "options": { "wait_for_model": true }
        });

        debug!("Scoring candidate with model {}", self.model);

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

            if status_code == 503 {
                return Err(PipelineError::ModelError {
                    model: self.model.clone(),
                    message: error_text,
                });
            }

            return Err(PipelineError::ApiError {
                status: status_code,
                message: error_text,
            });
        }

        let scores: Vec<f64> =
            response
                .json()
                .await
                .map_err(|e| PipelineError::InvalidResponseError {
                    message: e.to_string(),
                })?;

        scores
            .first()
            .copied()
            .ok_or_else(|| PipelineError::InvalidResponseError {
                message: "Empty score list in response".to_string(),
            })
    }
}

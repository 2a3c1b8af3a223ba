//! GPT fluency pass over raw machine translations

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::config::AppConfig;
use crate::core::errors::Result;
use crate::core::models::{Enhancement, Language};

/// Seam for the hosted completion API
///
/// Implementations must never fail the request: every failure class is
/// absorbed into an [`Enhancement`] variant.
#[async_trait]
pub trait FluencyEnhancer: Send + Sync {
    /// Improve grammar and fluency of a translation without changing meaning
    async fn enhance(&self, translation: &str, from: Language, to: Language) -> Enhancement;
}

/// One message of the fixed two-message prompt
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat-completion request body
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

/// Fluency enhancer backed by the OpenAI chat-completions API
#[derive(Debug, Clone)]
pub struct OpenAiEnhancer {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
}

impl OpenAiEnhancer {
    /// Create an enhancer from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.openai_endpoint.clone(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
            temperature: config.openai_temperature,
        })
    }

    /// Run the completion call; any error here becomes `Failed`
    async fn request_completion(
        &self,
        api_key: &str,
        translation: &str,
        from: Language,
        to: Language,
    ) -> std::result::Result<String, EnhanceFailure> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: format!(
                        "You are a helpful assistant. Improve the following {} to {} \
                         translation to make it more natural, accurate, and contextually \
                         appropriate.",
                        from, to
                    ),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: translation.to_string(),
                },
            ],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| EnhanceFailure::Other(e.to_string()))?;

        let status = response.status();

        if status.as_u16() == 429 {
            return Err(EnhanceFailure::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EnhanceFailure::Other(format!(
                "HTTP {}: {}",
                status.as_u16(),
                error_text
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| EnhanceFailure::Other(e.to_string()))?;

        let content = json["choices"]
            .get(0)
            .and_then(|c| c["message"]["content"].as_str())
            .ok_or_else(|| EnhanceFailure::Other("No completion in response".to_string()))?;

        Ok(content.trim().to_string())
    }
}

/// Internal failure classification for the completion call
enum EnhanceFailure {
    RateLimited,
    Other(String),
}

#[async_trait]
impl FluencyEnhancer for OpenAiEnhancer {
    async fn enhance(&self, translation: &str, from: Language, to: Language) -> Enhancement {
        let api_key = match &self.api_key {
            Some(key) => key.clone(),
            None => {
                debug!("No API credential configured, skipping enhancement");
                return Enhancement::Disabled {
                    original: translation.to_string(),
                };
            }
        };

        match self
            .request_completion(&api_key, translation, from, to)
            .await
        {
            Ok(text) => Enhancement::Applied { text },
            Err(EnhanceFailure::RateLimited) => {
                warn!("Completion API rate limit hit, passing translation through");
                Enhancement::RateLimited {
                    original: translation.to_string(),
                }
            }
            Err(EnhanceFailure::Other(reason)) => {
                warn!("Enhancement failed: {}", reason);
                Enhancement::Failed {
                    original: translation.to_string(),
                    reason,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enhancer_without_key() -> OpenAiEnhancer {
        OpenAiEnhancer::new(&AppConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_credential_degrades_without_network() {
        let enhancer = enhancer_without_key();
        let outcome = enhancer
            .enhance("Bonjour le monde", Language::English, Language::French)
            .await;

        assert_eq!(
            outcome,
            Enhancement::Disabled {
                original: "Bonjour le monde".to_string()
            }
        );
        assert_eq!(
            outcome.display_text(),
            "Bonjour le monde (GPT enhancement disabled)"
        );
    }
}

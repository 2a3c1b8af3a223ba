//! Speech synthesis for the displayed translation

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error};

use crate::core::config::AppConfig;
use crate::core::errors::{PipelineError, Result};

/// Seam for the speech-synthesis engine
///
/// Returns encoded audio ready for playback; the caller (browser form or
/// CLI) owns the actual playback.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` into mp3 bytes
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

/// Synthesizer backed by the OpenAI audio API
///
/// Unlike enhancement, speech has no degraded mode: a missing credential
/// is an error for this component.
#[derive(Debug, Clone)]
pub struct OpenAiSpeech {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    voice: String,
}

impl OpenAiSpeech {
    /// Create a synthesizer from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.openai_endpoint.clone(),
            api_key: config.openai_api_key.clone(),
            model: config.speech_model.clone(),
            voice: config.speech_voice.clone(),
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeech {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| PipelineError::ConfigError {
                message: "OPENAI_API_KEY is required for speech synthesis".to_string(),
            })?;

        let body = serde_json::json!({
            "model": self.model,
            "voice": self.voice,
            "input": text,
        });

        debug!("Synthesizing {} chars of speech", text.len());

        let response = self
            .client
            .post(format!("{}/audio/speech", self.endpoint))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            let status_code = status.as_u16();
            let error_text = response.text().await.unwrap_or_default();
            error!("Speech synthesis failed: {} - {}", status_code, error_text);

            return Err(PipelineError::SpeechError {
                message: format!("HTTP {}: {}", status_code, error_text),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PipelineError::SpeechError {
                message: e.to_string(),
            })?;

        Ok(bytes.to_vec())
    }
}

//! Configuration management

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Configuration for the localization pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// OpenAI API key; absence degrades enhancement and speech, never startup
    pub openai_api_key: Option<String>,
    /// OpenAI API base URL
    pub openai_endpoint: String,
    /// Chat model used for the fluency pass
    pub openai_model: String,
    /// Sampling temperature for the fluency pass
    pub openai_temperature: f32,
    /// Speech synthesis model
    pub speech_model: String,
    /// Speech synthesis voice
    pub speech_voice: String,
    /// Hugging Face inference API base URL
    pub hf_endpoint: String,
    /// Hugging Face API token, if any
    pub hf_api_token: Option<String>,
    /// Sentence-similarity model used for quality scoring
    pub scorer_model: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_endpoint: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-3.5-turbo".to_string(),
            openai_temperature: 0.3,
            speech_model: "tts-1".to_string(),
            speech_voice: "alloy".to_string(),
            hf_endpoint: "https://api-inference.huggingface.co".to_string(),
            hf_api_token: None,
            scorer_model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            timeout_ms: 60000,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let openai_endpoint =
            std::env::var("OPENAI_API_BASE").unwrap_or(defaults.openai_endpoint);

        let openai_model = std::env::var("OPENAI_MODEL").unwrap_or(defaults.openai_model);

        let openai_temperature = std::env::var("OPENAI_TEMPERATURE")
            .unwrap_or_else(|_| "0.3".to_string())
            .parse::<f32>()?;

        let speech_model = std::env::var("SPEECH_MODEL").unwrap_or(defaults.speech_model);
        let speech_voice = std::env::var("SPEECH_VOICE").unwrap_or(defaults.speech_voice);

        let hf_endpoint = std::env::var("HF_API_ENDPOINT").unwrap_or(defaults.hf_endpoint);

        let hf_api_token = std::env::var("HF_API_TOKEN").ok().filter(|t| !t.is_empty());

        let scorer_model = std::env::var("SCORER_MODEL").unwrap_or(defaults.scorer_model);

        let timeout_ms = std::env::var("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "60000".to_string())
            .parse::<u64>()?;

        Ok(Self {
            openai_api_key,
            openai_endpoint,
            openai_model,
            openai_temperature,
            speech_model,
            speech_voice,
            hf_endpoint,
            hf_api_token,
            scorer_model,
            timeout_ms,
        })
    }

    /// Load and validate configuration
    pub fn load() -> anyhow::Result<Self> {
        let config = Self::from_env()?;
        config.validate()?;

        if config.openai_api_key.is_none() {
            warn!("OPENAI_API_KEY not set, GPT enhancement and speech are disabled");
        }

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.openai_endpoint.is_empty() {
            return Err(anyhow::anyhow!("OpenAI endpoint is required"));
        }

        if self.hf_endpoint.is_empty() {
            return Err(anyhow::anyhow!("Hugging Face endpoint is required"));
        }

        if self.scorer_model.is_empty() {
            return Err(anyhow::anyhow!("Scorer model is required"));
        }

        if self.timeout_ms == 0 {
            return Err(anyhow::anyhow!("timeout_ms must be greater than 0"));
        }

        Ok(())
    }

    /// Whether the hosted completion API can be used
    pub fn enhancement_available(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.enhancement_available());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = AppConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_endpoint() {
        let config = AppConfig {
            hf_endpoint: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enhancement_available_with_key() {
        let config = AppConfig {
            openai_api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        assert!(config.enhancement_available());
    }
}

//! Core data models for the localization pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages selectable in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum Language {
    /// English
    English,
    /// French
    French,
    /// Spanish
    Spanish,
    /// German
    German,
    /// Hindi
    Hindi,
    /// Telugu
    Telugu,
    /// Tamil
    Tamil,
}

impl Language {
    /// All languages offered by the dropdowns
    pub const ALL: &'static [Language] = &[
        Language::English,
        Language::French,
        Language::Spanish,
        Language::German,
        Language::Hindi,
        Language::Telugu,
        Language::Tamil,
    ];

    /// Human-readable name, as shown in the UI and used in prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "French",
            Language::Spanish => "Spanish",
            Language::German => "German",
            Language::Hindi => "Hindi",
            Language::Telugu => "Telugu",
            Language::Tamil => "Tamil",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single translation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateJob {
    /// Text to translate
    pub text: String,
    /// Source language
    pub from: Language,
    /// Target language
    pub to: Language,
    /// Whether to run the GPT fluency pass
    pub enhance: bool,
}

impl TranslateJob {
    /// Create a job with enhancement disabled
    pub fn new(text: impl Into<String>, from: Language, to: Language) -> Self {
        Self {
            text: text.into(),
            from,
            to,
            enhance: false,
        }
    }

    /// Request the GPT fluency pass
    pub fn with_enhancement(mut self) -> Self {
        self.enhance = true;
        self
    }
}

/// Outcome of the fluency pass
///
/// The enhancer never fails a request: every failure mode is captured here
/// and rendered as an annotated pass-through of the raw translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Enhancement {
    /// Enhancement was not requested for this job
    NotRequested,
    /// The completion API returned an improved sentence
    Applied {
        /// Trimmed completion text
        text: String,
    },
    /// No API credential is configured
    Disabled {
        /// The untouched raw translation
        original: String,
    },
    /// The completion API reported a rate-limit / quota condition
    RateLimited {
        /// The untouched raw translation
        original: String,
    },
    /// Any other completion failure
    Failed {
        /// The untouched raw translation
        original: String,
        /// Stringified cause
        reason: String,
    },
}

impl Enhancement {
    /// The string shown in the "Enhanced Translation" output field
    pub fn display_text(&self) -> String {
        match self {
            Enhancement::NotRequested => "(Enhancement not applied)".to_string(),
            Enhancement::Applied { text } => text.clone(),
            Enhancement::Disabled { original } => {
                format!("{} (GPT enhancement disabled)", original)
            }
            Enhancement::RateLimited { original } => {
                format!("{} (GPT skipped: quota exceeded)", original)
            }
            Enhancement::Failed { original, reason } => {
                format!("{} (GPT skipped: {})", original, reason)
            }
        }
    }

    /// True when the completion API actually produced text
    pub fn is_applied(&self) -> bool {
        matches!(self, Enhancement::Applied { .. })
    }
}

/// Result of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// Raw machine translation
    pub original_translation: String,
    /// Fluency pass outcome
    pub enhancement: Enhancement,
    /// Quality score of the raw translation, rounded to 3 decimals
    pub original_score: f64,
    /// Quality score of the enhanced candidate; None when enhancement was off
    pub enhanced_score: Option<f64>,
}

impl PipelineOutput {
    /// "Enhanced Translation" output field
    pub fn enhanced_translation_field(&self) -> String {
        self.enhancement.display_text()
    }

    /// "Quality Score (Original)" output field
    pub fn original_score_field(&self) -> String {
        format!("{:.3}", self.original_score)
    }

    /// "Quality Score (Enhanced)" output field; "(N/A)" when enhancement was off
    pub fn enhanced_score_field(&self) -> String {
        match self.enhanced_score {
            Some(score) => format!("{:.3}", score),
            None => "(N/A)".to_string(),
        }
    }
}

/// Informal quality banding for the legend; never drives control flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    /// 0.80 - 1.00
    Excellent,
    /// 0.60 - 0.79
    Good,
    /// 0.40 - 0.59
    Fair,
    /// Below 0.40
    Poor,
}

impl ScoreBand {
    /// Band for a score in the documented 0.0 - 1.0 range
    pub fn for_score(score: f64) -> Self {
        if score >= 0.80 {
            ScoreBand::Excellent
        } else if score >= 0.60 {
            ScoreBand::Good
        } else if score >= 0.40 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreBand::Excellent => write!(f, "Excellent translation"),
            ScoreBand::Good => write!(f, "Good, minor issues"),
            ScoreBand::Fair => write!(f, "Fair, some errors"),
            ScoreBand::Poor => write!(f, "Poor quality"),
        }
    }
}

/// Human-readable legend for the score output fields
pub fn score_legend() -> &'static str {
    "Quality Score Legend\n\
     - 0.80 - 1.00: Excellent translation\n\
     - 0.60 - 0.79: Good, minor issues\n\
     - 0.40 - 0.59: Fair, some errors\n\
     - Below 0.40: Poor quality"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhancement_display_text() {
        assert_eq!(
            Enhancement::NotRequested.display_text(),
            "(Enhancement not applied)"
        );
        assert_eq!(
            Enhancement::Applied {
                text: "Bonjour".to_string()
            }
            .display_text(),
            "Bonjour"
        );
        assert_eq!(
            Enhancement::Disabled {
                original: "Bonjour".to_string()
            }
            .display_text(),
            "Bonjour (GPT enhancement disabled)"
        );
        assert_eq!(
            Enhancement::RateLimited {
                original: "Bonjour".to_string()
            }
            .display_text(),
            "Bonjour (GPT skipped: quota exceeded)"
        );
        assert_eq!(
            Enhancement::Failed {
                original: "Bonjour".to_string(),
                reason: "connection reset".to_string()
            }
            .display_text(),
            "Bonjour (GPT skipped: connection reset)"
        );
    }

    #[test]
    fn test_score_fields() {
        let output = PipelineOutput {
            original_translation: "Bonjour".to_string(),
            enhancement: Enhancement::NotRequested,
            original_score: 0.812,
            enhanced_score: None,
        };

        assert_eq!(output.original_score_field(), "0.812");
        assert_eq!(output.enhanced_score_field(), "(N/A)");
        assert_eq!(
            output.enhanced_translation_field(),
            "(Enhancement not applied)"
        );
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::for_score(0.95), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_score(0.80), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_score(0.79), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(0.60), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(0.59), ScoreBand::Fair);
        assert_eq!(ScoreBand::for_score(0.40), ScoreBand::Fair);
        assert_eq!(ScoreBand::for_score(0.39), ScoreBand::Poor);
    }

    #[test]
    fn test_language_names() {
        for lang in Language::ALL {
            assert_eq!(lang.to_string(), lang.as_str());
        }
    }
}

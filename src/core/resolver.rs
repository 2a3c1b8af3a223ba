//! Language-pair to translation-model resolution

use crate::core::errors::{PipelineError, Result};
use crate::core::models::Language;

/// Supported pairs and the pretrained Marian model serving each one
const MODEL_TABLE: &[(Language, Language, &str)] = &[
    (Language::English, Language::French, "Helsinki-NLP/opus-mt-en-fr"),
    (Language::English, Language::Spanish, "Helsinki-NLP/opus-mt-en-es"),
    (Language::English, Language::German, "Helsinki-NLP/opus-mt-en-de"),
    (Language::English, Language::Hindi, "Helsinki-NLP/opus-mt-en-hi"),
    (Language::English, Language::Telugu, "Helsinki-NLP/opus-mt-en-te"),
    (Language::English, Language::Tamil, "Helsinki-NLP/opus-mt-en-ta"),
];

/// Resolve the model id for a language pair
///
/// Fails with [`PipelineError::UnsupportedPair`] when no mapping exists;
/// there is deliberately no fallback.
pub fn resolve_model(from: Language, to: Language) -> Result<&'static str> {
    MODEL_TABLE
        .iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .map(|(_, _, model)| *model)
        .ok_or(PipelineError::UnsupportedPair { from, to })
}

/// All supported (source, target) pairs
pub fn supported_pairs() -> Vec<(Language, Language)> {
    MODEL_TABLE.iter().map(|(f, t, _)| (*f, *t)).collect()
}

/// Whether a pair has a model mapped
pub fn is_supported(from: Language, to: Language) -> bool {
    resolve_model(from, to).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_supported_pair() {
        let model = resolve_model(Language::English, Language::French).unwrap();
        assert_eq!(model, "Helsinki-NLP/opus-mt-en-fr");
    }

    #[test]
    fn test_resolve_unsupported_pair_fails() {
        let result = resolve_model(Language::French, Language::English);
        assert!(matches!(
            result,
            Err(PipelineError::UnsupportedPair {
                from: Language::French,
                to: Language::English
            })
        ));
    }

    #[test]
    fn test_same_language_pair_fails() {
        assert!(resolve_model(Language::English, Language::English).is_err());
    }

    #[test]
    fn test_supported_pairs_all_resolve() {
        for (from, to) in supported_pairs() {
            assert!(is_supported(from, to));
        }
        assert_eq!(supported_pairs().len(), 6);
    }
}

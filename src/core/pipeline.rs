//! Pipeline orchestrator: resolve -> translate -> enhance? -> score

use std::sync::Arc;
use tracing::{debug, info};

use crate::core::config::AppConfig;
use crate::core::enhancer::{FluencyEnhancer, OpenAiEnhancer};
use crate::core::errors::Result;
use crate::core::models::{Enhancement, PipelineOutput, TranslateJob};
use crate::core::resolver;
use crate::core::scorer::{HfSimilarityScorer, QualityScorer};
use crate::core::translator::{HfTranslator, TranslationBackend};

/// Round a score to 3 decimal places
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// The localization pipeline
///
/// Holds explicitly injected collaborators; construct once and share via
/// `Arc` across requests.
#[derive(Clone)]
pub struct Pipeline {
    translator: Arc<dyn TranslationBackend>,
    enhancer: Arc<dyn FluencyEnhancer>,
    scorer: Arc<dyn QualityScorer>,
}

impl Pipeline {
    /// Create a pipeline from injected collaborators
    pub fn new(
        translator: Arc<dyn TranslationBackend>,
        enhancer: Arc<dyn FluencyEnhancer>,
        scorer: Arc<dyn QualityScorer>,
    ) -> Self {
        Self {
            translator,
            enhancer,
            scorer,
        }
    }

    /// Wire the hosted implementations from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            Arc::new(HfTranslator::new(config)?),
            Arc::new(OpenAiEnhancer::new(config)?),
            Arc::new(HfSimilarityScorer::new(config)?),
        ))
    }

    /// Run one job through the pipeline
    ///
    /// An unsupported pair or a translation/scoring failure fails the
    /// request; enhancement failures are absorbed into the outcome. The
    /// raw translation is always scored; the enhanced candidate only when
    /// enhancement was requested.
    pub async fn run(&self, job: &TranslateJob) -> Result<PipelineOutput> {
        let model_id = resolver::resolve_model(job.from, job.to)?;
        debug!("Resolved {} -> {} to {}", job.from, job.to, model_id);

        let original = self.translator.translate(&job.text, model_id).await?;

        let enhancement = if job.enhance {
            self.enhancer.enhance(&original, job.from, job.to).await
        } else {
            Enhancement::NotRequested
        };

        let original_score = round3(self.scorer.score(&job.text, &original).await?);

        let enhanced_score = if job.enhance {
            let candidate = enhancement.display_text();
            Some(round3(self.scorer.score(&job.text, &candidate).await?))
        } else {
            None
        };

        info!(
            "Translated {} -> {} (enhanced: {}, score: {:.3})",
            job.from,
            job.to,
            enhancement.is_applied(),
            original_score
        );

        Ok(PipelineOutput {
            original_translation: original,
            enhancement,
            original_score,
            enhanced_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Language;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedTranslator {
        reply: &'static str,
        calls: AtomicUsize,
    }

    impl FixedTranslator {
        fn new(reply: &'static str) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TranslationBackend for FixedTranslator {
        async fn translate(&self, _text: &str, _model_id: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.to_string())
        }
    }

    struct FixedScorer {
        reply: f64,
        calls: AtomicUsize,
    }

    impl FixedScorer {
        fn new(reply: f64) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl QualityScorer for FixedScorer {
        async fn score(&self, _reference: &str, _candidate: &str) -> Result<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply)
        }
    }

    struct AppliedEnhancer;

    #[async_trait]
    impl FluencyEnhancer for AppliedEnhancer {
        async fn enhance(&self, _t: &str, _f: Language, _to: Language) -> Enhancement {
            Enhancement::Applied {
                text: "Bonjour, comment allez-vous ?".to_string(),
            }
        }
    }

    struct DisabledEnhancer;

    #[async_trait]
    impl FluencyEnhancer for DisabledEnhancer {
        async fn enhance(&self, t: &str, _f: Language, _to: Language) -> Enhancement {
            Enhancement::Disabled {
                original: t.to_string(),
            }
        }
    }

    struct RateLimitedEnhancer;

    #[async_trait]
    impl FluencyEnhancer for RateLimitedEnhancer {
        async fn enhance(&self, t: &str, _f: Language, _to: Language) -> Enhancement {
            Enhancement::RateLimited {
                original: t.to_string(),
            }
        }
    }

    fn job(enhance: bool) -> TranslateJob {
        let job = TranslateJob::new(
            "Hello, how are you?",
            Language::English,
            Language::French,
        );
        if enhance {
            job.with_enhancement()
        } else {
            job
        }
    }

    #[tokio::test]
    async fn test_enhancement_off_uses_markers_and_scores_once() {
        let scorer = Arc::new(FixedScorer::new(0.81234));
        let pipeline = Pipeline::new(
            Arc::new(FixedTranslator::new("Bonjour comment allez-vous")),
            Arc::new(AppliedEnhancer),
            scorer.clone(),
        );

        let output = pipeline.run(&job(false)).await.unwrap();

        assert_eq!(output.original_translation, "Bonjour comment allez-vous");
        assert_eq!(output.enhancement, Enhancement::NotRequested);
        assert_eq!(
            output.enhanced_translation_field(),
            "(Enhancement not applied)"
        );
        assert_eq!(output.enhanced_score_field(), "(N/A)");
        assert_eq!(output.original_score, 0.812);
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_enhancement_on_scores_both_candidates() {
        let scorer = Arc::new(FixedScorer::new(0.7));
        let pipeline = Pipeline::new(
            Arc::new(FixedTranslator::new("Bonjour comment allez-vous")),
            Arc::new(AppliedEnhancer),
            scorer.clone(),
        );

        let output = pipeline.run(&job(true)).await.unwrap();

        assert!(output.enhancement.is_applied());
        assert_eq!(
            output.enhanced_translation_field(),
            "Bonjour, comment allez-vous ?"
        );
        assert_eq!(output.enhanced_score, Some(0.7));
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_disabled_enhancement_annotates_pass_through() {
        let pipeline = Pipeline::new(
            Arc::new(FixedTranslator::new("Bonjour comment allez-vous")),
            Arc::new(DisabledEnhancer),
            Arc::new(FixedScorer::new(0.5)),
        );

        let output = pipeline.run(&job(true)).await.unwrap();

        assert_eq!(
            output.enhanced_translation_field(),
            "Bonjour comment allez-vous (GPT enhancement disabled)"
        );
        assert!(output
            .enhanced_translation_field()
            .ends_with("(GPT enhancement disabled)"));
        // Degraded enhancement still gets a score
        assert_eq!(output.enhanced_score, Some(0.5));
    }

    #[tokio::test]
    async fn test_rate_limited_enhancement_annotates_pass_through() {
        let pipeline = Pipeline::new(
            Arc::new(FixedTranslator::new("Bonjour")),
            Arc::new(RateLimitedEnhancer),
            Arc::new(FixedScorer::new(0.5)),
        );

        let output = pipeline.run(&job(true)).await.unwrap();

        assert_eq!(
            output.enhanced_translation_field(),
            "Bonjour (GPT skipped: quota exceeded)"
        );
    }

    #[tokio::test]
    async fn test_unsupported_pair_fails_before_translation() {
        let translator = Arc::new(FixedTranslator::new("unused"));
        let pipeline = Pipeline::new(
            translator.clone(),
            Arc::new(AppliedEnhancer),
            Arc::new(FixedScorer::new(0.5)),
        );

        let bad_job = TranslateJob::new("Bonjour", Language::French, Language::English);
        let result = pipeline.run(&bad_job).await;

        assert!(result.is_err());
        assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.81234), 0.812);
        assert_eq!(round3(0.8125), 0.813);
        assert_eq!(round3(0.9999), 1.0);
        assert_eq!(round3(0.0), 0.0);
    }
}

//! HTTP API server and web form

use axum::{
    extract::{Json, State},
    http::header,
    response::Html,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::config::AppConfig;
use crate::core::models::{score_legend, Language, ScoreBand, TranslateJob};
use crate::core::pipeline::Pipeline;
use crate::core::resolver;
use crate::core::speech::{OpenAiSpeech, SpeechSynthesizer};

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// The localization pipeline
    pub pipeline: Pipeline,
    /// Speech synthesizer for the Listen button
    pub speech: Arc<dyn SpeechSynthesizer>,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

/// Languages and supported pairs for the dropdowns
#[derive(Serialize)]
struct LanguagesResponse {
    languages: Vec<String>,
    pairs: Vec<PairInfo>,
    legend: String,
}

/// One supported (source, target) pair
#[derive(Serialize)]
struct PairInfo {
    from: String,
    to: String,
}

/// Translation request from the form
#[derive(Deserialize)]
pub struct TranslateRequest {
    /// Text to translate
    pub text: String,
    /// Source language
    pub from: Language,
    /// Target language
    pub to: Language,
    /// Whether to run the GPT fluency pass
    #[serde(default)]
    pub enhance: bool,
}

/// The four output fields of the form, plus the legend band
#[derive(Serialize)]
pub struct TranslateResponse {
    /// "Original Translation" field
    pub original_translation: String,
    /// "Enhanced Translation" field, with sentinel markers
    pub enhanced_translation: String,
    /// "Quality Score (Original)" field
    pub original_score: String,
    /// "Quality Score (Enhanced)" field, "(N/A)" when enhancement was off
    pub enhanced_score: String,
    /// Legend band for the original score
    pub band: String,
}

/// Speech request for the Listen button
#[derive(Deserialize)]
pub struct SpeakRequest {
    /// Text to synthesize
    pub text: String,
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorDetail,
}

/// Error payload
#[derive(Serialize)]
pub struct ErrorDetail {
    /// Human-readable message
    pub message: String,
    /// Machine-readable code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    fn new(message: impl Into<String>, code: &str) -> Json<Self> {
        Json(Self {
            error: ErrorDetail {
                message: message.into(),
                code: Some(code.to_string()),
            },
        })
    }
}

/// Serve the embedded form page
async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

/// Health check handler
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "localization-enhancer".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Languages handler
async fn get_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: Language::ALL.iter().map(|l| l.to_string()).collect(),
        pairs: resolver::supported_pairs()
            .into_iter()
            .map(|(from, to)| PairInfo {
                from: from.to_string(),
                to: to.to_string(),
            })
            .collect(),
        legend: score_legend().to_string(),
    })
}

/// Translation handler
async fn translate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, Json<ErrorResponse>> {
    if payload.text.trim().is_empty() {
        return Err(ErrorResponse::new("No text to translate", "invalid_request"));
    }

    let mut job = TranslateJob::new(payload.text, payload.from, payload.to);
    if payload.enhance {
        job = job.with_enhancement();
    }

    match state.pipeline.run(&job).await {
        Ok(output) => Ok(Json(TranslateResponse {
            original_translation: output.original_translation.clone(),
            enhanced_translation: output.enhanced_translation_field(),
            original_score: output.original_score_field(),
            enhanced_score: output.enhanced_score_field(),
            band: ScoreBand::for_score(output.original_score).to_string(),
        })),
        Err(e) => {
            warn!("Translation failed: {}", e);
            Err(ErrorResponse::new(e.to_string(), "translation_error"))
        }
    }
}

/// Speech handler; returns mp3 bytes played by the form
async fn speak(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SpeakRequest>,
) -> Result<([(header::HeaderName, &'static str); 1], Vec<u8>), Json<ErrorResponse>> {
    if payload.text.trim().is_empty() {
        return Err(ErrorResponse::new("No text to speak", "invalid_request"));
    }

    match state.speech.synthesize(&payload.text).await {
        Ok(audio) => Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio)),
        Err(e) => {
            warn!("Speech synthesis failed: {}", e);
            Err(ErrorResponse::new(e.to_string(), "speech_error"))
        }
    }
}

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/languages", get(get_languages))
        .route("/api/translate", post(translate))
        .route("/api/speak", post(speak))
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_server(host: String, port: u16) -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    let pipeline = Pipeline::from_config(&config)?;
    let speech: Arc<dyn SpeechSynthesizer> = Arc::new(OpenAiSpeech::new(&config)?);

    let state = Arc::new(AppState { pipeline, speech });
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

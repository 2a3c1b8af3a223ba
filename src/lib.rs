//! Localization Enhancer - translation pipeline with GPT fluency post-editing
//!
//! This library chains a hosted pretrained translation model, an optional
//! GPT fluency pass, a reference-based quality score and speech synthesis
//! behind a web form and a CLI.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod server;

// Re-export key types for convenience
pub use crate::core::{
    config::AppConfig,
    errors::PipelineError,
    models::{Enhancement, Language, PipelineOutput, ScoreBand, TranslateJob},
    pipeline::Pipeline,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

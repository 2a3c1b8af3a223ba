//! CLI command definitions and handlers

use clap::Subcommand;
use std::path::PathBuf;

use crate::core::models::Language;

/// Commands for the localization enhancer
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server with the web form
    Serve {
        /// Bind address (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Listen port (default: 8000)
        #[arg(short, long, default_value_t = 8000)]
        port: u16,

        /// Enable debug mode
        #[arg(long)]
        debug: bool,
    },

    /// Translate a single text through the full pipeline
    Translate {
        /// Text to translate
        text: String,

        /// Source language
        #[arg(long, value_enum, default_value = "english")]
        from: Language,

        /// Target language
        #[arg(long, value_enum, default_value = "french")]
        to: Language,

        /// Run the GPT fluency pass
        #[arg(long)]
        enhance: bool,

        /// Synthesize the displayed translation to this mp3 file
        #[arg(long)]
        speech_out: Option<PathBuf>,
    },

    /// List supported languages and pairs
    Languages,
}

/// Handle server command
pub async fn handle_serve(host: String, port: u16, debug: bool) -> anyhow::Result<()> {
    use crate::server::api::run_server;
    use tracing::info;

    if debug {
        std::env::set_var("RUST_LOG", "debug");
    }

    info!("Starting HTTP server on {}:{}", host, port);
    println!("🚀 Server starting on http://{}:{}", host, port);
    println!("🌍 Web form: http://{}:{}/", host, port);

    run_server(host, port).await?;

    Ok(())
}

/// Handle one-shot translate command
pub async fn handle_translate(
    text: String,
    from: Language,
    to: Language,
    enhance: bool,
    speech_out: Option<PathBuf>,
) -> anyhow::Result<()> {
    use crate::core::config::AppConfig;
    use crate::core::models::{ScoreBand, TranslateJob};
    use crate::core::pipeline::Pipeline;
    use crate::core::speech::{OpenAiSpeech, SpeechSynthesizer};
    use std::time::Instant;
    use tracing::info;

    let start_time = Instant::now();

    info!("Translating {} -> {} (enhance: {})", from, to, enhance);

    let config = AppConfig::load()?;
    let pipeline = Pipeline::from_config(&config)?;

    let mut job = TranslateJob::new(text, from, to);
    if enhance {
        job = job.with_enhancement();
    }

    let output = pipeline.run(&job).await?;
    let band = ScoreBand::for_score(output.original_score);

    println!("\n✅ Translation completed in {:?}", start_time.elapsed());
    println!("   Original Translation: {}", output.original_translation);
    println!(
        "   Enhanced Translation: {}",
        output.enhanced_translation_field()
    );
    println!(
        "   Quality Score (Original): {} ({})",
        output.original_score_field(),
        band
    );
    println!(
        "   Quality Score (Enhanced): {}",
        output.enhanced_score_field()
    );

    if let Some(path) = speech_out {
        let speech = OpenAiSpeech::new(&config)?;
        let audio = speech.synthesize(&output.enhanced_translation_field()).await?;
        std::fs::write(&path, &audio)?;
        println!("🔊 Speech written to {}", path.display());
    }

    Ok(())
}

/// Handle languages command
pub async fn handle_languages() -> anyhow::Result<()> {
    use crate::core::resolver;

    println!("Languages:");
    for lang in Language::ALL {
        println!("   {}", lang);
    }

    println!("\nSupported pairs:");
    for (from, to) in resolver::supported_pairs() {
        println!("   {} -> {}", from, to);
    }

    Ok(())
}

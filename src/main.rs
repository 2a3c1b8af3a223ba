//! Main entry point for the Localization Enhancer CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod core;
mod server;

use cli::commands::Commands;

/// Localization Enhancer - translation with GPT fluency post-editing and quality scoring
#[derive(Parser, Debug)]
#[command(name = "localization-enhancer", version, about, long_about = None)]
struct Args {
    /// OpenAI API key (optional, defaults to OPENAI_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}={}", env!("CARGO_PKG_NAME"), log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Override config with CLI args if provided
    if let Some(api_key) = args.api_key {
        std::env::set_var("OPENAI_API_KEY", api_key);
    }

    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }

    // Execute command
    match args.command {
        Some(Commands::Serve { host, port, debug }) => {
            cli::commands::handle_serve(host, port, debug).await?;
        }
        Some(Commands::Translate {
            text,
            from,
            to,
            enhance,
            speech_out,
        }) => {
            cli::commands::handle_translate(text, from, to, enhance, speech_out).await?;
        }
        Some(Commands::Languages) => {
            cli::commands::handle_languages().await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}

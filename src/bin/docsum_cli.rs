use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use docsum::{
    analysis::{AnalysisService, default_prompt},
    config,
    gemini::GeminiClient,
    logging,
};

#[derive(Parser)]
#[command(
    name = "docsum-cli",
    about = "Summarize a batch of local documents in one combined request"
)]
struct Cli {
    /// Paths of the documents to analyze.
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Prompt sent alongside the uploaded documents.
    #[arg(long)]
    prompt: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    config::init_config();
    logging::init_tracing();
    let cli = Cli::parse();

    // Single client for this invocation's one run; no teardown needed.
    let gemini = GeminiClient::new().context("failed to initialize Gemini client")?;
    let service = AnalysisService::new(gemini);

    let prompt = cli
        .prompt
        .unwrap_or_else(|| default_prompt(cli.files.len()));
    let outcome = service.analyze(&cli.files, &prompt).await;

    if !outcome.succeeded {
        bail!(
            "{}",
            outcome
                .failure_reason
                .unwrap_or_else(|| "analysis failed".to_string())
        );
    }

    println!("{}", outcome.summary_text.unwrap_or_default());
    eprintln!(
        "Analyzed {} files ({} prompt tokens)",
        outcome.files_analyzed,
        outcome.token_usage.unwrap_or(0)
    );
    Ok(())
}

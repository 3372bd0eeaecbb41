//! Main Entrypoint for the cosmocli Client
//!
//! This binary is responsible for:
//! 1. Parsing CLI arguments and loading configuration from the environment.
//! 2. Initializing logging.
//! 3. Loading the system prompt.
//! 4. Probing the home agent server and refusing to start without it.
//! 5. Running the console dialog loop, or serving the agent tools over
//!    stdio for an external voice host.

mod config;
mod console;
mod prompts;

use anyhow::{Context, bail};
use async_openai::config::OpenAIConfig;
use clap::Parser;
use config::{ClassifierKind, Config};
use cosmo_core::{
    agent_client::{AgentBackend, HttpAgentClient},
    classify::{HeuristicClassifier, IntentClassifier},
    llm_client::LlmClassifier,
    router::RequestRouter,
    tools::CosmoToolService,
};
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;
use tracing::info;

/// Command-line client for the Cosmo home agent.
#[derive(Parser, Debug)]
#[command(name = "cosmocli", version, about)]
struct Cli {
    /// Serve the agent tools over stdio for an MCP-capable voice host
    /// instead of running the console dialog loop.
    #[arg(long)]
    tools: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    // In tool mode stdout carries the protocol, so logs go to stderr.
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339());
    if cli.tools {
        subscriber.with_writer(std::io::stderr).init();
    } else {
        subscriber.init();
    }

    // --- 3. Load the System Prompt ---
    let system_prompt = prompts::load_system_prompt(&config.prompts_path)?;

    // --- 4. Probe the Home Agent ---
    let base_url = config.base_url();
    let backend: Arc<dyn AgentBackend> =
        Arc::new(HttpAgentClient::new(&base_url, config.request_timeout)?);
    if let Err(error) = backend.check_health().await {
        bail!("Cosmo server is not running at {base_url}: {error}");
    }
    info!(%base_url, "Connected to the home agent");

    // --- 5. Run the Selected Mode ---
    if cli.tools {
        info!("Serving agent tools over stdio");
        let service = CosmoToolService::new(backend, system_prompt)
            .serve(stdio())
            .await
            .context("Failed to start the tool server")?;
        service.waiting().await?;
        return Ok(());
    }

    let classifier: Arc<dyn IntentClassifier> = match &config.classifier {
        ClassifierKind::Heuristic => Arc::new(HeuristicClassifier::new()),
        ClassifierKind::Llm => {
            let api_key = config.openai_api_key.as_ref().unwrap();
            let openai_config = OpenAIConfig::new().with_api_key(api_key);
            Arc::new(LlmClassifier::new(
                openai_config,
                config.chat_model.clone(),
            ))
        }
    };
    info!(classifier = ?config.classifier, "Starting console dialog loop");
    console::run_dialog_loop(RequestRouter::new(classifier, backend)).await
}

pub mod application;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::{agent, prompt, retry, sink, stdio, tooling};
pub use cli::Cli;
pub use config::{AppConfig, Environment};
pub use domain::types;
pub use error::AppError;
pub use infrastructure::model;

use agent::{Agent, AgentOptions};
use model::OpenAIClient;
use prompt::TaskPrompt;
use retry::{RetryPolicy, TerminalObserver, run_with_retries};
use sink::ResultSink;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tooling::McpSession;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `INIT → CONNECT → PROMPT → ATTEMPT* → SAVE`.
///
/// Configuration, model setup, server connection, terminal input and the
/// output write are fatal. Agent failures are retried and, once exhausted,
/// replaced by the failure sentinel.
pub async fn run(cli: Cli) -> Result<(), AppError> {
    init_tracing(cli.verbose);
    info!("Starting browser-agent");

    let env_path = cli
        .env_file
        .as_deref()
        .unwrap_or_else(|| Path::new(constants::ENV_PATH));
    let vars = Environment::load(env_path)?;
    let mut config = AppConfig::load(cli.config.as_deref(), &vars)?;
    apply_cli_overrides(&cli, &mut config);
    debug!(?config, "Configuration resolved");

    let provider = OpenAIClient::from_config(&config.provider, &vars)?;

    println!("Connecting to MCP Server...");
    let session = Arc::new(McpSession::connect(&config.servers).await?);
    println!("MCP client connected successfully!");

    let agent = Agent::new(
        provider,
        session.clone(),
        AgentOptions::new(&config.provider.model, &config.agent),
    );

    let task = match cli.task {
        Some(task) => task,
        None => stdio::read_task(io::stdin().lock(), io::stdout())?,
    };
    let prompt = TaskPrompt::new(&task);
    if prompt.is_blank() {
        warn!("Task instruction is empty, running the agent anyway");
    }
    info!(instruction = prompt.instruction(), "Task received");

    let policy = RetryPolicy::from(&config.retry);
    let outcome = run_with_retries(
        &agent,
        prompt.as_str(),
        &policy,
        &mut TerminalObserver::stdout(),
    )
    .await;
    info!(
        attempts = outcome.attempts(),
        success = outcome.is_success(),
        "Task finished"
    );

    ResultSink::new(config.output.path.clone()).publish(&outcome.into_message())?;

    session.shutdown().await;
    info!("Client execution finished");
    Ok(())
}

fn apply_cli_overrides(cli: &Cli, config: &mut AppConfig) {
    if let Some(path) = &cli.output {
        info!(path = %path.display(), "Overriding output path from CLI flag");
        config.output.path = path.clone();
    }
    if cli.verbose {
        config.agent.verbose = true;
    }
}

fn init_tracing(verbose: bool) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let default_level = if verbose { "info" } else { "warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));
        fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .with_level(true)
            .init();
    });
}

use anyhow::Result;
use clap::Parser;
use opswatch::cli::{Cli, Commands};
use opswatch::runner::{Runner, RunnerError};
use opswatch::{create_supervisor_agent, render_agent_tree, telemetry, utils, Settings};
use tracing_subscriber::EnvFilter;

const DEFAULT_PROMPT: &str = "Give me an ops briefing: what happened overnight, what are the \
                              top risks, and what should leadership do next?";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone())),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { server_id, hours } => {
            let server_id = server_id.unwrap_or_else(|| settings.demo.server_id.clone());
            let hours = hours.unwrap_or(settings.demo.hours);
            handle_demo(&settings, &server_id, hours)
        }
        Commands::Run {
            prompts,
            verbose,
            quiet,
        } => handle_run(&settings, prompts, verbose, quiet).await,
    }
}

/// Smoke demo: print the agent hierarchy and trimmed samples from each
/// telemetry tool. Never talks to the hosted model.
fn handle_demo(settings: &Settings, server_id: &str, hours: i64) -> Result<()> {
    // The tree is only inspected here, so a missing API key is fine.
    let api_key = Settings::api_key().unwrap_or_default();
    let supervisor = create_supervisor_agent(settings, api_key);

    utils::print_header("Agent hierarchy");
    print!("{}", render_agent_tree(&supervisor));

    utils::print_header("Tool samples");

    let logs = telemetry::fetch_server_logs(server_id, 60)?;
    println!("fetch_server_logs:");
    println!("{}", utils::shorten(&logs, 160));

    let summary = telemetry::summarize_utilization(hours, 3)?;
    println!("\nsummarize_utilization:");
    println!("{}", serde_json::to_string_pretty(&summary)?);

    let digest = telemetry::fetch_incident_digest();
    println!("\nfetch_incident_digest:");
    println!("{}", serde_json::to_string_pretty(&digest)?);

    Ok(())
}

/// Route prompts through the supervisor via the runner. Quota exhaustion
/// is reported clearly instead of surfacing as a crash.
async fn handle_run(
    settings: &Settings,
    prompts: Vec<String>,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let api_key = Settings::api_key()?;
    let supervisor = create_supervisor_agent(settings, api_key);

    let prompts = if prompts.is_empty() {
        vec![DEFAULT_PROMPT.to_string()]
    } else {
        prompts
    };

    let runner = Runner::new(supervisor).verbose(verbose).quiet(quiet);

    match runner.run_debug(&prompts).await {
        Ok(events) => {
            if quiet {
                utils::print_success(&format!("Captured {} events from the runner.", events.len()));
            }
            Ok(())
        }
        Err(RunnerError::QuotaExhausted(msg)) => {
            utils::print_error(&format!("Model quota exhausted, stopping: {}", msg));
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

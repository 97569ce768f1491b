// ABOUTME: Entry point for the stevedore CLI application.
// ABOUTME: Parses arguments, wires service clients, and dispatches to the orchestrator.

mod cli;

use clap::Parser;
use cli::{Cli, Commands, DeployArgs};
use std::env;
use stevedore::api::{HttpDeployer, HttpOrchestration};
use stevedore::config::{self, RunConfig};
use stevedore::deploy::{DeployOutcome, Orchestrator};
use stevedore::diagnostics::Diagnostics;
use stevedore::error::{Error, Result};
use stevedore::notify::{CustomBlocks, Notifier, RunContext, Settings};
use stevedore::output::{Output, OutputMode};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let mode = match cli.output.as_str() {
        "quiet" => OutputMode::Quiet,
        "json" => OutputMode::Json,
        _ => OutputMode::Normal,
    };
    let mut output = Output::new(mode);

    let result = match cli.command {
        Commands::Deploy(args) => deploy(args, &mut output).await,
        Commands::Register(args) => deploy(args.into(), &mut output).await,
    };

    if let Err(e) = result {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn deploy(args: DeployArgs, output: &mut Output) -> Result<()> {
    output.start_timer();

    let config = build_config(&args)?;
    let settings = build_notify_settings(&args)?;

    // Whether notifications go out is decided here, before anything can fail.
    let context = RunContext::from_env();
    let notifier = Notifier::from_settings(settings, context);

    let orchestration = HttpOrchestration::new(&config.orchestrator_url)
        .map_err(|e| Error::InvalidConfig(e.to_string()))?;
    let deployer = HttpDeployer::new(&config.deployer_url)
        .map_err(|e| Error::InvalidConfig(e.to_string()))?;

    let mut diag = Diagnostics::default();
    let orchestrator = Orchestrator::new(&config, &orchestration, &deployer, notifier.as_ref());
    let result = orchestrator.execute(output, &mut diag).await;

    // Emit collected warnings
    for warning in diag.warnings() {
        output.warning(&warning.message);
    }

    match result {
        Ok(outcome) => {
            report(output, &outcome);
            output.success("Deployment complete!");
            Ok(())
        }
        Err((outcome, e)) => {
            // Partial outputs survive a failure: an assigned revision or
            // deployment id is still reported.
            report(output, &outcome);
            Err(e)
        }
    }
}

fn report(output: &Output, outcome: &DeployOutcome) {
    if let Some(revision) = &outcome.revision {
        output.result(&format!("Task definition revision: {revision}"));
    }
    if let Some(id) = &outcome.deployment_id {
        output.result(&format!("Deployment id: {id}"));
    }
    output.record("outcome", outcome);
}

fn build_config(args: &DeployArgs) -> Result<RunConfig> {
    let orchestrator_url = args
        .api_url
        .clone()
        .or_else(|| env::var(config::API_URL_ENV).ok())
        .filter(|url| !url.is_empty())
        .ok_or_else(|| {
            Error::InvalidConfig(format!(
                "orchestration API URL not set (use --api-url or {})",
                config::API_URL_ENV
            ))
        })?;
    let deployer_url = args
        .deployer_url
        .clone()
        .or_else(|| env::var(config::DEPLOYER_URL_ENV).ok())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| orchestrator_url.clone());
    let console_url = args
        .console_url
        .clone()
        .or_else(|| env::var(config::CONSOLE_URL_ENV).ok())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| format!("{}/console", orchestrator_url.trim_end_matches('/')));

    let workspace_root = args
        .workspace
        .clone()
        .unwrap_or_else(config::workspace_root);

    Ok(RunConfig {
        task_definition: args.task_definition.clone(),
        service: args.service.clone(),
        cluster: args.cluster.clone(),
        wait_for_stability: args.wait_for_stability.clone(),
        wait_minutes: config::normalize_wait_minutes(args.wait_minutes),
        appspec: args.appspec.clone(),
        application: args.application.clone(),
        deployment_group: args.deployment_group.clone(),
        workspace_root,
        orchestrator_url,
        deployer_url,
        console_url,
    })
}

fn build_notify_settings(args: &DeployArgs) -> Result<Settings> {
    let custom = match (
        &args.notify_blocks_waiting,
        &args.notify_blocks_success,
        &args.notify_blocks_failure,
    ) {
        (Some(waiting), Some(success), Some(failure)) => {
            Some(CustomBlocks::load(waiting, success, failure)?)
        }
        (None, None, None) => None,
        _ => {
            // Custom blocks apply only as a complete set of three.
            tracing::debug!("ignoring partial custom notification blocks");
            None
        }
    };

    Ok(Settings {
        webhook_url: args.notify_webhook.clone(),
        channel: args.notify_channel.clone(),
        display_text: args.notify_text.clone(),
        language: args.notify_language.clone(),
        custom,
    })
}

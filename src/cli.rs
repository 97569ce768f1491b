// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stevedore")]
#[command(about = "Task-definition deployment orchestrator for container services")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output mode: normal, quiet, or json
    #[arg(long, global = true, default_value = "normal")]
    pub output: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a task definition and roll it out to a service
    Deploy(DeployArgs),

    /// Register a task definition without touching any service
    Register(RegisterArgs),
}

#[derive(Args)]
pub struct DeployArgs {
    /// Path to the task definition file (YAML or JSON)
    #[arg(long)]
    pub task_definition: PathBuf,

    /// Service to update; when omitted only the registration happens
    #[arg(long)]
    pub service: Option<String>,

    /// Cluster containing the service (defaults to "default")
    #[arg(long)]
    pub cluster: Option<String>,

    /// Wait for the rollout to stabilize ("true" enables waiting)
    #[arg(long, default_value = "false")]
    pub wait_for_stability: String,

    /// Minutes to wait for stability (default 30, capped at 360)
    #[arg(long, default_value_t = 30)]
    pub wait_minutes: u64,

    /// App-spec manifest for blue/green rollouts (defaults to appspec.yaml)
    #[arg(long)]
    pub appspec: Option<PathBuf>,

    /// Deployment-service application name (defaults to App-<cluster>-<service>)
    #[arg(long)]
    pub application: Option<String>,

    /// Deployment-group name (defaults to Dgp-<cluster>-<service>)
    #[arg(long)]
    pub deployment_group: Option<String>,

    /// Workspace root for resolving relative paths
    #[arg(long)]
    pub workspace: Option<PathBuf>,

    /// Base URL of the orchestration service API
    #[arg(long)]
    pub api_url: Option<String>,

    /// Base URL of the deployment service API
    #[arg(long)]
    pub deployer_url: Option<String>,

    /// Base URL for console deep-links
    #[arg(long)]
    pub console_url: Option<String>,

    /// Webhook URL for lifecycle notifications
    #[arg(long)]
    pub notify_webhook: Option<String>,

    /// Channel to post notifications to
    #[arg(long)]
    pub notify_channel: Option<String>,

    /// Fallback display text for notifications
    #[arg(long)]
    pub notify_text: Option<String>,

    /// Language for default notification blocks
    #[arg(long, default_value = "eng")]
    pub notify_language: String,

    /// Custom waiting-message block document (JSON)
    #[arg(long)]
    pub notify_blocks_waiting: Option<PathBuf>,

    /// Custom success-message block document (JSON)
    #[arg(long)]
    pub notify_blocks_success: Option<PathBuf>,

    /// Custom failure-message block document (JSON)
    #[arg(long)]
    pub notify_blocks_failure: Option<PathBuf>,
}

#[derive(Args)]
pub struct RegisterArgs {
    /// Path to the task definition file (YAML or JSON)
    #[arg(long)]
    pub task_definition: PathBuf,

    /// Workspace root for resolving relative paths
    #[arg(long)]
    pub workspace: Option<PathBuf>,

    /// Base URL of the orchestration service API
    #[arg(long)]
    pub api_url: Option<String>,
}

impl From<RegisterArgs> for DeployArgs {
    fn from(args: RegisterArgs) -> Self {
        DeployArgs {
            task_definition: args.task_definition,
            service: None,
            cluster: None,
            wait_for_stability: "false".to_string(),
            wait_minutes: 30,
            appspec: None,
            application: None,
            deployment_group: None,
            workspace: args.workspace,
            api_url: args.api_url,
            deployer_url: None,
            console_url: None,
            notify_webhook: None,
            notify_channel: None,
            notify_text: None,
            notify_language: "eng".to_string(),
            notify_blocks_waiting: None,
            notify_blocks_success: None,
            notify_blocks_failure: None,
        }
    }
}

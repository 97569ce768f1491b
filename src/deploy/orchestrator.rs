// ABOUTME: Top-level deployment sequence.
// ABOUTME: Registers the revision, dispatches on the service's controller, and routes notifications.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::blue_green::BlueGreen;
use super::error::DeployError;
use super::inspector::{self, Controller};
use super::rolling::RollingUpdate;
use crate::api::{Deployer, Orchestration};
use crate::config::RunConfig;
use crate::diagnostics::Diagnostics;
use crate::error::Error;
use crate::notify::Notifier;
use crate::output::Output;
use crate::taskdef;
use crate::types::{DeploymentId, RevisionArn};

/// What a run produced. Fields fill in as the sequence progresses and are
/// kept on failure: an already-registered revision or an already-submitted
/// deployment is never rolled back.
#[derive(Debug, Clone, Serialize)]
pub struct DeployOutcome {
    pub revision: Option<RevisionArn>,
    pub deployment_id: Option<DeploymentId>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl DeployOutcome {
    fn begin() -> Self {
        Self {
            revision: None,
            deployment_id: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }
}

/// Result of a run: the outcome always comes back, paired with the error on
/// failure so partial outputs stay reportable.
pub type RunResult = Result<DeployOutcome, (DeployOutcome, Error)>;

/// Sequences one deployment run: normalize and register the task definition,
/// inspect the target service, dispatch to the matching strategy, and send
/// the terminal notification.
pub struct Orchestrator<'a, C: Orchestration, D: Deployer> {
    config: &'a RunConfig,
    orchestration: &'a C,
    deployer: &'a D,
    notifier: Option<&'a Notifier>,
}

impl<'a, C: Orchestration, D: Deployer> Orchestrator<'a, C, D> {
    /// Whether a notification destination exists is decided by the caller
    /// constructing (or not constructing) the notifier before anything here
    /// can fail.
    pub fn new(
        config: &'a RunConfig,
        orchestration: &'a C,
        deployer: &'a D,
        notifier: Option<&'a Notifier>,
    ) -> Self {
        Self {
            config,
            orchestration,
            deployer,
            notifier,
        }
    }

    /// Run the full sequence. Exactly one terminal notification goes out per
    /// run when a destination is configured.
    pub async fn execute(&self, output: &Output, diag: &mut Diagnostics) -> RunResult {
        let mut outcome = DeployOutcome::begin();
        let result = self.run(&mut outcome, output, diag).await;
        outcome.finished_at = Some(Utc::now());

        if let Some(notifier) = self.notifier {
            match &result {
                Ok(()) => notifier.deploy_succeeded(),
                Err(_) => notifier.deploy_failed(),
            }
        }

        match result {
            Ok(()) => Ok(outcome),
            Err(e) => Err((outcome, e)),
        }
    }

    async fn run(
        &self,
        outcome: &mut DeployOutcome,
        output: &Output,
        diag: &mut Diagnostics,
    ) -> Result<(), Error> {
        let path = self.config.task_definition_path();
        output.progress(&format!(
            "  → Registering task definition from {}...",
            path.display()
        ));
        let raw = taskdef::load(&path)?;
        let definition = taskdef::normalize(raw, diag);

        let revision = match self
            .orchestration
            .register_task_definition(&definition)
            .await
        {
            Ok(revision) => revision,
            Err(e) => {
                // Keep the exact submitted payload available for diagnostics.
                tracing::debug!(
                    "task definition contents: {}",
                    serde_json::to_string_pretty(&definition).unwrap_or_default()
                );
                return Err(DeployError::Registration(e.to_string()).into());
            }
        };
        output.progress(&format!("  → Registered revision: {revision}"));
        outcome.revision = Some(revision.clone());

        let Some(service) = self.config.service.as_deref().filter(|s| !s.is_empty()) else {
            tracing::debug!("service was not specified, no service updated");
            return Ok(());
        };
        let cluster = self.config.cluster_name();

        match inspector::inspect(self.orchestration, cluster, service).await? {
            Controller::Rolling => {
                self.rolling_update(cluster, service, &revision, output)
                    .await
            }
            Controller::BlueGreen => {
                self.blue_green(cluster, service, &revision, outcome, output, diag)
                    .await
            }
        }
    }

    async fn rolling_update(
        &self,
        cluster: &str,
        service: &str,
        revision: &RevisionArn,
        output: &Output,
    ) -> Result<(), Error> {
        let strategy = RollingUpdate::new(self.orchestration, cluster, service);
        strategy.submit(revision).await?;

        let events_url = self.config.service_events_url(cluster, service);
        output.progress(&format!("  → Update accepted. Watch progress at {events_url}"));
        if let Some(notifier) = self.notifier {
            notifier.deploy_started(&events_url);
        }

        if self.config.wait_enabled() {
            output.progress("  → Waiting for the service to become stable...");
            strategy.await_stable(self.config.wait_minutes).await?;
        } else {
            tracing::debug!("not waiting for the service to become stable");
        }
        Ok(())
    }

    async fn blue_green(
        &self,
        cluster: &str,
        service: &str,
        revision: &RevisionArn,
        outcome: &mut DeployOutcome,
        output: &Output,
        diag: &mut Diagnostics,
    ) -> Result<(), Error> {
        let strategy = BlueGreen::new(self.deployer, self.config, cluster, service);
        let submission = strategy.submit(revision, diag).await?;
        outcome.deployment_id = Some(submission.deployment_id.clone());

        let deployment_url = self.config.deployment_url(&submission.deployment_id);
        output.progress(&format!(
            "  → Deployment {} submitted. Watch progress at {deployment_url}",
            submission.deployment_id
        ));
        if let Some(notifier) = self.notifier {
            notifier.deploy_started(&deployment_url);
        }

        if self.config.wait_enabled() {
            output.progress(&format!(
                "  → Waiting up to {} minutes for the deployment to succeed...",
                submission.budget_minutes
            ));
            strategy.await_success(&submission).await?;
        } else {
            tracing::debug!("not waiting for the deployment to complete");
        }
        Ok(())
    }
}

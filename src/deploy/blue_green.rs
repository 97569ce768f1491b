// ABOUTME: Blue/green strategy driven by the external deployment service.
// ABOUTME: Patches the app spec with the new revision, submits it, and waits on deployment success.

use super::error::DeployError;
use super::waiter;
use crate::api::{Deployer, DeploymentRequest};
use crate::appspec::AppSpec;
use crate::config::RunConfig;
use crate::diagnostics::{Diagnostics, Warning};
use crate::types::{DeploymentId, RevisionArn};

const SUCCESS_CONDITION: &str = "deployment success";

/// A submitted deployment plus the wait budget derived from its group's
/// blue/green configuration. The id is assigned the moment the service
/// accepts the submission; a later wait failure does not revoke it.
#[derive(Debug, Clone)]
pub struct Submission {
    pub deployment_id: DeploymentId,
    pub budget_minutes: u64,
}

/// Blue/green rollout of a named service through the deployment service.
pub struct BlueGreen<'a, D: Deployer> {
    api: &'a D,
    config: &'a RunConfig,
    cluster: &'a str,
    service: &'a str,
}

impl<'a, D: Deployer> BlueGreen<'a, D> {
    pub fn new(api: &'a D, config: &'a RunConfig, cluster: &'a str, service: &'a str) -> Self {
        Self {
            api,
            config,
            cluster,
            service,
        }
    }

    /// Patch the app spec with `revision`, submit it, and compute the wait
    /// budget from the group's configured ready/termination times.
    pub async fn submit(
        &self,
        revision: &RevisionArn,
        diag: &mut Diagnostics,
    ) -> Result<Submission, DeployError> {
        let application = self.config.application_name(self.cluster, self.service);
        let group = self.config.deployment_group_name(self.cluster, self.service);

        let group_details = self
            .api
            .deployment_group(&application, &group)
            .await
            .map_err(|e| DeployError::DeploymentGroup {
                application: application.clone(),
                group: group.clone(),
                message: e.to_string(),
            })?;

        let manifest_path = self.config.appspec_path();
        tracing::debug!(
            "updating app spec {} with task definition {revision}",
            manifest_path.display()
        );
        let mut manifest = AppSpec::load(&manifest_path)?;
        manifest.pin_task_definition(revision)?;
        let rendered = manifest.render()?;

        tracing::debug!("starting deployment for {application}/{group}");
        let deployment_id = self
            .api
            .create_deployment(&DeploymentRequest {
                application,
                deployment_group: group,
                content: rendered.content,
                sha256: rendered.sha256,
            })
            .await
            .map_err(|e| DeployError::Submit(e.to_string()))?;

        let times = match group_details.blue_green {
            Some(times) => times,
            None => {
                diag.warn(Warning::wait_budget(
                    "deployment group has no blue/green configuration; \
                     assuming zero ready/termination wait",
                ));
                Default::default()
            }
        };
        let budget_minutes = waiter::clamp_minutes(
            times.ready_wait_minutes + times.termination_wait_minutes + self.config.wait_minutes,
        );

        Ok(Submission {
            deployment_id,
            budget_minutes,
        })
    }

    /// Block until the submitted deployment reports success. A deployment
    /// that lands in a terminal failure state ends the wait immediately
    /// instead of burning the remaining attempts.
    pub async fn await_success(&self, submission: &Submission) -> Result<(), DeployError> {
        let attempts = waiter::attempts_for(submission.budget_minutes);
        tracing::debug!(
            "waiting for the deployment to complete, up to {} minutes",
            submission.budget_minutes
        );

        let api = self.api;
        let id = &submission.deployment_id;
        waiter::wait_until(SUCCESS_CONDITION, waiter::POLL_DELAY, attempts, move || {
            async move {
                let status = api
                    .deployment_status(id)
                    .await
                    .map_err(|e| DeployError::Poll {
                        condition: SUCCESS_CONDITION.to_string(),
                        message: e.to_string(),
                    })?;
                if status.is_terminal_failure() {
                    return Err(DeployError::DeploymentEnded {
                        id: id.to_string(),
                        status: status.to_string(),
                    });
                }
                Ok(status == crate::api::DeploymentStatus::Succeeded)
            }
        })
        .await
    }
}

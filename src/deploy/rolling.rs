// ABOUTME: In-place rolling update strategy.
// ABOUTME: Pins the service to a new revision and optionally waits for stability.

use super::error::DeployError;
use super::waiter;
use crate::api::Orchestration;
use crate::types::RevisionArn;

const STABILITY_CONDITION: &str = "service stability";

/// Rolling update of a named service. The update request is accepted by the
/// orchestration service up front; waiting only observes the rollout, so a
/// wait failure leaves the accepted update in place.
pub struct RollingUpdate<'a, C: Orchestration> {
    api: &'a C,
    cluster: &'a str,
    service: &'a str,
}

impl<'a, C: Orchestration> RollingUpdate<'a, C> {
    pub fn new(api: &'a C, cluster: &'a str, service: &'a str) -> Self {
        Self {
            api,
            cluster,
            service,
        }
    }

    /// Issue the update pinning the service to `revision`.
    pub async fn submit(&self, revision: &RevisionArn) -> Result<(), DeployError> {
        tracing::debug!(
            "updating service {} in cluster {} to {revision}",
            self.service,
            self.cluster
        );
        self.api
            .update_service(self.cluster, self.service, revision)
            .await
            .map_err(|e| DeployError::Submit(e.to_string()))
    }

    /// Block until the service reports a steady state, within the clamped
    /// minute budget.
    pub async fn await_stable(&self, wait_minutes: u64) -> Result<(), DeployError> {
        let attempts = waiter::attempts_for(wait_minutes);
        tracing::debug!(
            "waiting for the service to become stable, up to {} minutes",
            waiter::clamp_minutes(wait_minutes)
        );

        let api = self.api;
        let cluster = self.cluster;
        let service = self.service;
        waiter::wait_until(STABILITY_CONDITION, waiter::POLL_DELAY, attempts, move || {
            async move {
                api.service_stable(cluster, service)
                    .await
                    .map_err(|e| DeployError::Poll {
                        condition: STABILITY_CONDITION.to_string(),
                        message: e.to_string(),
                    })
            }
        })
        .await
    }
}

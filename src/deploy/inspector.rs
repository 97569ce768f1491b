// ABOUTME: Live-service inspection ahead of strategy dispatch.
// ABOUTME: Validates the service is ACTIVE and resolves its deployment controller.

use super::error::DeployError;
use crate::api::Orchestration;

/// Controller kind string selecting the blue/green path.
pub const BLUE_GREEN_CONTROLLER: &str = "CODE_DEPLOY";

/// The only service status a deployment may proceed from.
pub const ACTIVE_STATUS: &str = "ACTIVE";

/// Deployment paths this tool can drive, resolved from the service's
/// configured controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    /// In-place rolling update driven by the orchestration service itself.
    Rolling,
    /// Blue/green rollout driven by the external deployment service.
    BlueGreen,
}

/// Describe the target service and decide which strategy applies.
///
/// Fails on the first failure entry the describe call reports, on a missing
/// service, on any status other than ACTIVE, and on a controller kind this
/// tool does not handle.
pub async fn inspect<C: Orchestration>(
    api: &C,
    cluster: &str,
    service: &str,
) -> Result<Controller, DeployError> {
    let description = api
        .describe_service(cluster, service)
        .await
        .map_err(|e| DeployError::Describe(e.to_string()))?;

    if let Some(failure) = description.failures.first() {
        return Err(DeployError::ServiceLookup {
            arn: failure.arn.clone(),
            reason: failure.reason.clone(),
        });
    }

    let summary = description.services.first().ok_or_else(|| {
        DeployError::Describe(format!("no service named '{service}' in cluster '{cluster}'"))
    })?;

    if summary.status != ACTIVE_STATUS {
        return Err(DeployError::ServiceState(summary.status.clone()));
    }

    match summary.deployment_controller.as_ref().map(|c| c.kind.as_str()) {
        None => Ok(Controller::Rolling),
        Some(BLUE_GREEN_CONTROLLER) => Ok(Controller::BlueGreen),
        Some(other) => Err(DeployError::UnsupportedController(other.to_string())),
    }
}

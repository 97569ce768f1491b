// ABOUTME: Client trait and wire types for the external blue/green deployment service.
// ABOUTME: Deployment-group lookup, deployment submission, and status polling.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ApiError;
use crate::types::DeploymentId;

/// Operations against the blue/green deployment service.
#[async_trait]
pub trait Deployer: Send + Sync {
    /// Fetch deployment-group details for wait-budget computation.
    async fn deployment_group(
        &self,
        application: &str,
        group: &str,
    ) -> Result<DeploymentGroup, ApiError>;

    /// Submit a new deployment; the content/digest pair lets the service
    /// verify the payload in transit.
    async fn create_deployment(
        &self,
        request: &DeploymentRequest,
    ) -> Result<DeploymentId, ApiError>;

    /// Current status of a submitted deployment.
    async fn deployment_status(&self, id: &DeploymentId) -> Result<DeploymentStatus, ApiError>;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentGroup {
    #[serde(default)]
    pub blue_green: Option<BlueGreenTimes>,
}

/// Wait times the deployment group is configured with: how long traffic can
/// sit ready before cutover, and how long the old task set lingers after a
/// successful cutover.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueGreenTimes {
    #[serde(default)]
    pub ready_wait_minutes: u64,
    #[serde(default)]
    pub termination_wait_minutes: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRequest {
    pub application: String,
    pub deployment_group: String,
    pub content: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DeploymentStatus {
    Created,
    Queued,
    InProgress,
    Ready,
    Succeeded,
    Failed,
    Stopped,
}

impl DeploymentStatus {
    /// Terminal states that can never become successful.
    pub fn is_terminal_failure(self) -> bool {
        matches!(self, DeploymentStatus::Failed | DeploymentStatus::Stopped)
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeploymentStatus::Created => "Created",
            DeploymentStatus::Queued => "Queued",
            DeploymentStatus::InProgress => "InProgress",
            DeploymentStatus::Ready => "Ready",
            DeploymentStatus::Succeeded => "Succeeded",
            DeploymentStatus::Failed => "Failed",
            DeploymentStatus::Stopped => "Stopped",
        };
        write!(f, "{name}")
    }
}

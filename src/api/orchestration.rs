// ABOUTME: Client trait and wire types for the container orchestration service.
// ABOUTME: Registration, service description, in-place updates, and stability checks.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::ApiError;
use crate::types::RevisionArn;

/// Operations against the container orchestration service.
#[async_trait]
pub trait Orchestration: Send + Sync {
    /// Register a task definition, returning the assigned immutable revision ARN.
    async fn register_task_definition(&self, definition: &Value) -> Result<RevisionArn, ApiError>;

    /// Describe a service in a cluster.
    async fn describe_service(
        &self,
        cluster: &str,
        service: &str,
    ) -> Result<ServiceDescription, ApiError>;

    /// Point a service at a new task-definition revision (in-place update).
    async fn update_service(
        &self,
        cluster: &str,
        service: &str,
        revision: &RevisionArn,
    ) -> Result<(), ApiError>;

    /// Whether the service currently reports a steady state.
    async fn service_stable(&self, cluster: &str, service: &str) -> Result<bool, ApiError>;
}

/// Wire shape of a describe call: failure entries plus matching services.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescription {
    #[serde(default)]
    pub failures: Vec<ServiceFailure>,
    #[serde(default)]
    pub services: Vec<ServiceSummary>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFailure {
    pub arn: String,
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    pub status: String,
    #[serde(default)]
    pub deployment_controller: Option<DeploymentControllerRef>,
}

/// The deployment controller configured on a service. Absence of the whole
/// field means the service rolls out in place.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentControllerRef {
    #[serde(rename = "type")]
    pub kind: String,
}

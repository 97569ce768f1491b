// ABOUTME: reqwest-backed implementations of the service client traits.
// ABOUTME: JSON over HTTP against configurable base URLs.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use super::deployer::{Deployer, DeploymentGroup, DeploymentRequest, DeploymentStatus};
use super::orchestration::{Orchestration, ServiceDescription};
use super::ApiError;
use crate::types::{DeploymentId, RevisionArn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn build_client() -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| ApiError::Transport(e.to_string()))
}

/// Read a successful JSON body, or turn a non-success status into a
/// `Rejected` error carrying the service's message verbatim.
async fn read_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

async fn read_empty(response: reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

/// HTTP client for the container orchestration service.
pub struct HttpOrchestration {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOrchestration {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterResponse {
    task_definition_arn: RevisionArn,
}

#[derive(Deserialize)]
struct StabilityResponse {
    stable: bool,
}

#[async_trait]
impl Orchestration for HttpOrchestration {
    async fn register_task_definition(&self, definition: &Value) -> Result<RevisionArn, ApiError> {
        let url = format!("{}/v1/task-definitions", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(definition)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let body: RegisterResponse = read_json(response).await?;
        Ok(body.task_definition_arn)
    }

    async fn describe_service(
        &self,
        cluster: &str,
        service: &str,
    ) -> Result<ServiceDescription, ApiError> {
        let url = format!(
            "{}/v1/clusters/{cluster}/services/{service}",
            self.base_url
        );
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        read_json(response).await
    }

    async fn update_service(
        &self,
        cluster: &str,
        service: &str,
        revision: &RevisionArn,
    ) -> Result<(), ApiError> {
        let url = format!(
            "{}/v1/clusters/{cluster}/services/{service}/task-definition",
            self.base_url
        );
        let response = self
            .client
            .put(&url)
            .json(&serde_json::json!({ "taskDefinition": revision }))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        read_empty(response).await
    }

    async fn service_stable(&self, cluster: &str, service: &str) -> Result<bool, ApiError> {
        let url = format!(
            "{}/v1/clusters/{cluster}/services/{service}/stability",
            self.base_url
        );
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let body: StabilityResponse = read_json(response).await?;
        Ok(body.stable)
    }
}

/// HTTP client for the blue/green deployment service.
pub struct HttpDeployer {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDeployer {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateDeploymentResponse {
    deployment_id: DeploymentId,
}

#[derive(Deserialize)]
struct DeploymentStatusResponse {
    status: DeploymentStatus,
}

#[async_trait]
impl Deployer for HttpDeployer {
    async fn deployment_group(
        &self,
        application: &str,
        group: &str,
    ) -> Result<DeploymentGroup, ApiError> {
        let url = format!(
            "{}/v1/applications/{application}/deployment-groups/{group}",
            self.base_url
        );
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        read_json(response).await
    }

    async fn create_deployment(
        &self,
        request: &DeploymentRequest,
    ) -> Result<DeploymentId, ApiError> {
        let url = format!("{}/v1/deployments", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let body: CreateDeploymentResponse = read_json(response).await?;
        Ok(body.deployment_id)
    }

    async fn deployment_status(&self, id: &DeploymentId) -> Result<DeploymentStatus, ApiError> {
        let url = format!("{}/v1/deployments/{id}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let body: DeploymentStatusResponse = read_json(response).await?;
        Ok(body.status)
    }
}

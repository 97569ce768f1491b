// ABOUTME: In-memory fake service clients for orchestrator tests.
// ABOUTME: Scriptable responses with recorded calls, no network involved.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use stevedore::api::{
    ApiError, Deployer, DeploymentControllerRef, DeploymentGroup, DeploymentRequest,
    DeploymentStatus, Orchestration, ServiceDescription, ServiceFailure, ServiceSummary,
};
use stevedore::types::{DeploymentId, RevisionArn};

pub const FAKE_REVISION: &str = "arn:svc:task-definition/web:42";
pub const FAKE_DEPLOYMENT: &str = "d-1234567";

/// Fake orchestration service with scriptable describe/stability behavior.
pub struct FakeOrchestration {
    /// When set, registration is rejected with this message.
    pub reject_registration: Option<String>,
    pub description: ServiceDescription,
    /// Number of stability polls before the service reports stable.
    pub stable_after: u32,
    pub registered: Mutex<Vec<Value>>,
    pub updates: Mutex<Vec<(String, String, String)>>,
    pub describes: AtomicU32,
    pub polls: AtomicU32,
}

impl Default for FakeOrchestration {
    fn default() -> Self {
        Self {
            reject_registration: None,
            description: ServiceDescription {
                failures: vec![],
                services: vec![ServiceSummary {
                    status: "ACTIVE".to_string(),
                    deployment_controller: None,
                }],
            },
            stable_after: 1,
            registered: Mutex::new(vec![]),
            updates: Mutex::new(vec![]),
            describes: AtomicU32::new(0),
            polls: AtomicU32::new(0),
        }
    }
}

impl FakeOrchestration {
    pub fn with_controller(kind: &str) -> Self {
        Self {
            description: ServiceDescription {
                failures: vec![],
                services: vec![ServiceSummary {
                    status: "ACTIVE".to_string(),
                    deployment_controller: Some(DeploymentControllerRef {
                        kind: kind.to_string(),
                    }),
                }],
            },
            ..Default::default()
        }
    }

    pub fn with_status(status: &str) -> Self {
        Self {
            description: ServiceDescription {
                failures: vec![],
                services: vec![ServiceSummary {
                    status: status.to_string(),
                    deployment_controller: None,
                }],
            },
            ..Default::default()
        }
    }

    pub fn with_failure(arn: &str, reason: &str) -> Self {
        Self {
            description: ServiceDescription {
                failures: vec![ServiceFailure {
                    arn: arn.to_string(),
                    reason: reason.to_string(),
                }],
                services: vec![],
            },
            ..Default::default()
        }
    }
}

#[async_trait]
impl Orchestration for FakeOrchestration {
    async fn register_task_definition(&self, definition: &Value) -> Result<RevisionArn, ApiError> {
        if let Some(message) = &self.reject_registration {
            return Err(ApiError::Rejected {
                status: 400,
                message: message.clone(),
            });
        }
        self.registered.lock().unwrap().push(definition.clone());
        Ok(RevisionArn::new(FAKE_REVISION.to_string()))
    }

    async fn describe_service(
        &self,
        _cluster: &str,
        _service: &str,
    ) -> Result<ServiceDescription, ApiError> {
        self.describes.fetch_add(1, Ordering::SeqCst);
        Ok(self.description.clone())
    }

    async fn update_service(
        &self,
        cluster: &str,
        service: &str,
        revision: &RevisionArn,
    ) -> Result<(), ApiError> {
        self.updates.lock().unwrap().push((
            cluster.to_string(),
            service.to_string(),
            revision.to_string(),
        ));
        Ok(())
    }

    async fn service_stable(&self, _cluster: &str, _service: &str) -> Result<bool, ApiError> {
        let polled = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(polled >= self.stable_after)
    }
}

/// Fake deployment service with a scripted status sequence.
pub struct FakeDeployer {
    pub group: DeploymentGroup,
    /// Statuses returned per poll, in order; once drained, InProgress forever.
    pub statuses: Mutex<VecDeque<DeploymentStatus>>,
    pub created: Mutex<Vec<DeploymentRequest>>,
    pub group_calls: Mutex<Vec<(String, String)>>,
    pub polls: AtomicU32,
}

impl Default for FakeDeployer {
    fn default() -> Self {
        Self {
            group: DeploymentGroup {
                blue_green: Some(stevedore::api::BlueGreenTimes {
                    ready_wait_minutes: 5,
                    termination_wait_minutes: 10,
                }),
            },
            statuses: Mutex::new(VecDeque::from([DeploymentStatus::Succeeded])),
            created: Mutex::new(vec![]),
            group_calls: Mutex::new(vec![]),
            polls: AtomicU32::new(0),
        }
    }
}

impl FakeDeployer {
    pub fn with_statuses(statuses: impl IntoIterator<Item = DeploymentStatus>) -> Self {
        Self {
            statuses: Mutex::new(statuses.into_iter().collect()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl Deployer for FakeDeployer {
    async fn deployment_group(
        &self,
        application: &str,
        group: &str,
    ) -> Result<DeploymentGroup, ApiError> {
        self.group_calls
            .lock()
            .unwrap()
            .push((application.to_string(), group.to_string()));
        Ok(self.group.clone())
    }

    async fn create_deployment(
        &self,
        request: &DeploymentRequest,
    ) -> Result<DeploymentId, ApiError> {
        self.created.lock().unwrap().push(request.clone());
        Ok(DeploymentId::new(FAKE_DEPLOYMENT.to_string()))
    }

    async fn deployment_status(&self, _id: &DeploymentId) -> Result<DeploymentStatus, ApiError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let next = self.statuses.lock().unwrap().pop_front();
        Ok(next.unwrap_or(DeploymentStatus::InProgress))
    }
}

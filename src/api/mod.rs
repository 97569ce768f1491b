// ABOUTME: Client seams for the orchestration and deployment services.
// ABOUTME: Traits for testability plus reqwest-backed HTTP implementations.

mod deployer;
mod http;
mod orchestration;

pub use deployer::{
    BlueGreenTimes, Deployer, DeploymentGroup, DeploymentRequest, DeploymentStatus,
};
pub use http::{HttpDeployer, HttpOrchestration};
pub use orchestration::{
    DeploymentControllerRef, Orchestration, ServiceDescription, ServiceFailure, ServiceSummary,
};

/// Errors from service API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a usable response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

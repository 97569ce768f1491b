// ABOUTME: Error taxonomy for deployment runs.
// ABOUTME: Every variant is fatal to the run; causing messages are preserved verbatim.

use thiserror::Error;

/// Errors that can end a deployment run. None are retried internally and
/// nothing is rolled back: an already-registered revision or an
/// already-submitted deployment stays in place.
#[derive(Debug, Error)]
pub enum DeployError {
    /// The orchestration service rejected the task definition.
    #[error("failed to register task definition: {0}")]
    Registration(String),

    /// The describe call itself failed or matched nothing.
    #[error("failed to look up service: {0}")]
    Describe(String),

    /// The describe call reported a failure entry for the service.
    #[error("{arn} is {reason}")]
    ServiceLookup { arn: String, reason: String },

    /// The service exists but is not in a deployable state.
    #[error("service is {0}")]
    ServiceState(String),

    /// The service uses a deployment controller this tool cannot drive.
    #[error("unsupported deployment controller: {0}")]
    UnsupportedController(String),

    /// The app-spec file could not be read or parsed.
    #[error("failed to load app spec file: {0}")]
    ManifestLoad(String),

    /// A required manifest key is absent.
    #[error("app spec file must include property '{0}'")]
    ManifestField(String),

    /// The deployment group backing the blue/green rollout could not be fetched.
    #[error("failed to fetch deployment group {application}/{group}: {message}")]
    DeploymentGroup {
        application: String,
        group: String,
        message: String,
    },

    /// The update or deployment submission was rejected.
    #[error("failed to submit deployment: {0}")]
    Submit(String),

    /// A status poll failed outright.
    #[error("failed to poll {condition}: {message}")]
    Poll { condition: String, message: String },

    /// A deployment reached a terminal non-success state while waiting.
    #[error("deployment {id} ended as {status}")]
    DeploymentEnded { id: String, status: String },

    /// The stability/success condition never became true within the budget.
    #[error("timed out waiting for {condition} after {attempts} attempts")]
    Timeout { condition: String, attempts: u32 },
}

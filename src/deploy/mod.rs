// ABOUTME: Deployment orchestration: inspection, strategies, polling, and the run sequence.
// ABOUTME: Exports the orchestrator plus the shared error taxonomy.

mod blue_green;
mod error;
mod inspector;
mod orchestrator;
mod rolling;
pub mod waiter;

pub use blue_green::{BlueGreen, Submission};
pub use error::DeployError;
pub use inspector::{ACTIVE_STATUS, BLUE_GREEN_CONTROLLER, Controller, inspect};
pub use orchestrator::{DeployOutcome, Orchestrator, RunResult};
pub use rolling::RollingUpdate;

// ABOUTME: Domain identifier types shared across the crate.
// ABOUTME: Phantom-typed ids prevent mixing revisions with deployments.

mod id;

pub use id::{DeploymentId, DeploymentMarker, Id, RevisionArn, RevisionMarker};

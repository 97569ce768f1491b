// ABOUTME: App-spec manifest handling for blue/green deployments.
// ABOUTME: Case-insensitive field lookup, task-definition pinning, canonical rendering and digest.

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::deploy::DeployError;
use crate::types::RevisionArn;

/// Manifest key holding the list of deployable resources.
pub const RESOURCES_KEY: &str = "resources";
/// Resource key holding the properties mapping.
pub const PROPERTIES_KEY: &str = "properties";
/// Properties key referencing the task-definition revision.
pub const TASK_DEFINITION_KEY: &str = "taskDefinition";

/// A parsed app-spec manifest.
///
/// The manifest is authored outside this tool; all structural lookups match
/// key names case-insensitively, first match wins.
#[derive(Debug, Clone)]
pub struct AppSpec {
    doc: Value,
}

/// Canonical rendering of a manifest plus the digest the deployment service
/// uses to verify the payload was not altered in transit.
#[derive(Debug, Clone)]
pub struct RenderedAppSpec {
    pub content: String,
    pub sha256: String,
}

impl AppSpec {
    pub fn from_yaml(text: &str) -> Result<Self, DeployError> {
        let doc = serde_yaml::from_str(text)
            .map_err(|e| DeployError::ManifestLoad(e.to_string()))?;
        Ok(Self { doc })
    }

    pub fn load(path: &Path) -> Result<Self, DeployError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            DeployError::ManifestLoad(format!("{}: {e}", path.display()))
        })?;
        Self::from_yaml(&text)
    }

    /// Rewrite every resource's task-definition reference to `revision`.
    ///
    /// A resource whose properties lack the reference field is a fatal
    /// configuration error naming the missing property; nothing else in the
    /// document is touched. Returns how many resources were pinned.
    pub fn pin_task_definition(&mut self, revision: &RevisionArn) -> Result<usize, DeployError> {
        let resources = find_value_mut(&mut self.doc, RESOURCES_KEY)?;
        let Value::Array(resources) = resources else {
            return Err(DeployError::ManifestField(RESOURCES_KEY.to_string()));
        };

        let mut pinned = 0;
        for resource in resources {
            let Value::Object(entries) = resource else {
                continue;
            };
            for contents in entries.values_mut() {
                let properties = find_value_mut(contents, PROPERTIES_KEY)?;
                let Value::Object(properties) = properties else {
                    return Err(DeployError::ManifestField(PROPERTIES_KEY.to_string()));
                };
                // Preserve the author's spelling of the key, only swap the value.
                let key = properties
                    .keys()
                    .find(|k| k.eq_ignore_ascii_case(TASK_DEFINITION_KEY))
                    .cloned()
                    .ok_or_else(|| {
                        DeployError::ManifestField(TASK_DEFINITION_KEY.to_string())
                    })?;
                properties.insert(key, Value::String(revision.as_str().to_string()));
                pinned += 1;
            }
        }
        Ok(pinned)
    }

    /// Serialize to canonical JSON text and digest it. The same text is
    /// submitted alongside the digest.
    pub fn render(&self) -> Result<RenderedAppSpec, DeployError> {
        let content = serde_json::to_string(&self.doc)
            .map_err(|e| DeployError::ManifestLoad(e.to_string()))?;
        let sha256 = format!("{:x}", Sha256::digest(content.as_bytes()));
        Ok(RenderedAppSpec { content, sha256 })
    }

    /// Access the underlying document.
    pub fn document(&self) -> &Value {
        &self.doc
    }
}

/// Case-insensitive key lookup in a mapping, first match wins. A non-mapping
/// value or a missing key is reported against the wanted key name.
fn find_value_mut<'a>(value: &'a mut Value, name: &str) -> Result<&'a mut Value, DeployError> {
    match value {
        Value::Object(map) => map
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
            .ok_or_else(|| DeployError::ManifestField(name.to_string())),
        _ => Err(DeployError::ManifestField(name.to_string())),
    }
}

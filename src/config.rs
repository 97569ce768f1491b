// ABOUTME: Run configuration assembled from CLI flags and environment.
// ABOUTME: Owns defaulting, clamping, and path-resolution rules for a deployment run.

use std::path::{Path, PathBuf};

use crate::deploy::waiter;
use crate::types::DeploymentId;

pub const DEFAULT_CLUSTER: &str = "default";
pub const DEFAULT_APPSPEC: &str = "appspec.yaml";
pub const DEFAULT_WAIT_MINUTES: u64 = 30;

/// Environment variable naming the workspace root for relative paths.
pub const WORKSPACE_ENV: &str = "STEVEDORE_WORKSPACE";
/// CI fallback for the workspace root.
pub const CI_WORKSPACE_ENV: &str = "GITHUB_WORKSPACE";

/// Environment fallbacks for the service endpoints.
pub const API_URL_ENV: &str = "STEVEDORE_API_URL";
pub const DEPLOYER_URL_ENV: &str = "STEVEDORE_DEPLOYER_URL";
pub const CONSOLE_URL_ENV: &str = "STEVEDORE_CONSOLE_URL";

/// Everything one deployment run needs to know, resolved up front.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Task definition file; relative paths resolve against the workspace root.
    pub task_definition: PathBuf,
    /// Service to update. `None` registers the task definition and stops.
    pub service: Option<String>,
    pub cluster: Option<String>,
    /// Wait-enable flag as supplied; only the string "true" (any case) waits.
    pub wait_for_stability: String,
    /// Minute budget for waiting, already normalized via [`normalize_wait_minutes`].
    pub wait_minutes: u64,
    /// App-spec manifest override for blue/green rollouts.
    pub appspec: Option<PathBuf>,
    pub application: Option<String>,
    pub deployment_group: Option<String>,
    pub workspace_root: PathBuf,
    pub orchestrator_url: String,
    pub deployer_url: String,
    pub console_url: String,
}

impl RunConfig {
    /// The cluster to address, defaulting when unspecified or blank.
    pub fn cluster_name(&self) -> &str {
        self.cluster
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CLUSTER)
    }

    /// Waiting is opt-in through the literal string "true", case-insensitively.
    pub fn wait_enabled(&self) -> bool {
        self.wait_for_stability.eq_ignore_ascii_case("true")
    }

    /// Deployment-service application name: explicit override, else the
    /// `App-<cluster>-<service>` convention.
    pub fn application_name(&self, cluster: &str, service: &str) -> String {
        self.application
            .as_deref()
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("App-{cluster}-{service}"))
    }

    /// Deployment-group name: explicit override, else the
    /// `Dgp-<cluster>-<service>` convention.
    pub fn deployment_group_name(&self, cluster: &str, service: &str) -> String {
        self.deployment_group
            .as_deref()
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Dgp-{cluster}-{service}"))
    }

    /// Absolute paths pass through; relative paths resolve against the
    /// workspace root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }

    pub fn task_definition_path(&self) -> PathBuf {
        self.resolve(&self.task_definition)
    }

    pub fn appspec_path(&self) -> PathBuf {
        self.resolve(
            self.appspec
                .as_deref()
                .unwrap_or_else(|| Path::new(DEFAULT_APPSPEC)),
        )
    }

    /// Console deep-link for a service's event stream.
    pub fn service_events_url(&self, cluster: &str, service: &str) -> String {
        format!(
            "{}/clusters/{cluster}/services/{service}/events",
            self.console_url.trim_end_matches('/')
        )
    }

    /// Console deep-link for a submitted deployment.
    pub fn deployment_url(&self, id: &DeploymentId) -> String {
        format!("{}/deployments/{id}", self.console_url.trim_end_matches('/'))
    }

    /// A baseline configuration for tests and examples.
    pub fn template() -> Self {
        Self {
            task_definition: PathBuf::from("taskdef.yaml"),
            service: Some("web".to_string()),
            cluster: Some("apps".to_string()),
            wait_for_stability: "false".to_string(),
            wait_minutes: DEFAULT_WAIT_MINUTES,
            appspec: None,
            application: None,
            deployment_group: None,
            workspace_root: PathBuf::from("."),
            orchestrator_url: "http://localhost:9400".to_string(),
            deployer_url: "http://localhost:9401".to_string(),
            console_url: "https://console.example.com".to_string(),
        }
    }
}

/// Normalize a user-supplied wait budget: zero (or anything unparseable
/// upstream) falls back to the default, everything caps at the global
/// ceiling.
pub fn normalize_wait_minutes(minutes: u64) -> u64 {
    if minutes == 0 {
        DEFAULT_WAIT_MINUTES
    } else {
        minutes.min(waiter::MAX_WAIT_MINUTES)
    }
}

/// Workspace root for resolving relative manifest paths: explicit env var,
/// then the CI workspace, then the current directory.
pub fn workspace_root() -> PathBuf {
    std::env::var(WORKSPACE_ENV)
        .or_else(|_| std::env::var(CI_WORKSPACE_ENV))
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_defaults_when_unset_or_blank() {
        let mut config = RunConfig::template();
        config.cluster = None;
        assert_eq!(config.cluster_name(), "default");

        config.cluster = Some(String::new());
        assert_eq!(config.cluster_name(), "default");

        config.cluster = Some("apps".to_string());
        assert_eq!(config.cluster_name(), "apps");
    }

    #[test]
    fn wait_flag_accepts_only_true() {
        let mut config = RunConfig::template();
        for flag in ["true", "TRUE", "True"] {
            config.wait_for_stability = flag.to_string();
            assert!(config.wait_enabled(), "{flag} should enable waiting");
        }
        for flag in ["false", "yes", "1", ""] {
            config.wait_for_stability = flag.to_string();
            assert!(!config.wait_enabled(), "{flag} should not enable waiting");
        }
    }

    #[test]
    fn naming_conventions_apply_without_overrides() {
        let mut config = RunConfig::template();
        assert_eq!(config.application_name("apps", "web"), "App-apps-web");
        assert_eq!(config.deployment_group_name("apps", "web"), "Dgp-apps-web");

        config.application = Some("payments".to_string());
        config.deployment_group = Some("payments-prod".to_string());
        assert_eq!(config.application_name("apps", "web"), "payments");
        assert_eq!(config.deployment_group_name("apps", "web"), "payments-prod");
    }

    #[test]
    fn wait_minutes_normalize_and_clamp() {
        assert_eq!(normalize_wait_minutes(0), DEFAULT_WAIT_MINUTES);
        assert_eq!(normalize_wait_minutes(45), 45);
        assert_eq!(normalize_wait_minutes(500), 360);
    }

    #[test]
    fn relative_paths_resolve_against_the_workspace() {
        let mut config = RunConfig::template();
        config.workspace_root = PathBuf::from("/work");
        assert_eq!(
            config.appspec_path(),
            PathBuf::from("/work/appspec.yaml")
        );

        config.appspec = Some(PathBuf::from("/etc/spec.yaml"));
        assert_eq!(config.appspec_path(), PathBuf::from("/etc/spec.yaml"));
    }
}

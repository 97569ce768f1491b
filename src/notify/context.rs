// ABOUTME: Run metadata captured once at startup for notification templates.
// ABOUTME: An explicit value object instead of ambient environment reads inside templates.

/// CI metadata shown in default notification blocks. Built once when the run
/// starts; missing variables become empty strings rather than errors.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub repository: String,
    pub branch: String,
    pub event: String,
    pub commit: String,
    pub run_id: String,
}

impl RunContext {
    pub fn from_env() -> Self {
        let get = |name: &str| std::env::var(name).unwrap_or_default();
        Self {
            repository: get("GITHUB_REPOSITORY"),
            branch: get("GITHUB_REF"),
            event: get("GITHUB_EVENT_NAME"),
            commit: get("GITHUB_SHA"),
            run_id: get("GITHUB_RUN_ID"),
        }
    }

    /// Link to the commit that triggered the run.
    pub fn commit_url(&self) -> String {
        format!(
            "https://github.com/{}/commit/{}",
            self.repository, self.commit
        )
    }

    /// Link to the run's checks view.
    pub fn checks_url(&self) -> String {
        format!(
            "https://github.com/{}/commit/{}/checks/?check_suite_id={}",
            self.repository, self.commit, self.run_id
        )
    }
}

// ABOUTME: Diagnostics accumulator for non-fatal warnings during a run.
// ABOUTME: Collects warnings that shouldn't fail a deployment but should be shown to users.

/// Collects non-fatal warnings during deployment operations.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected during a deployment run.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Create a warning for a server-managed attribute stripped from a task definition.
    pub fn server_managed_attribute(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::ServerManagedAttribute,
            message: message.into(),
        }
    }

    /// Create a warning about an incomplete wait-budget computation.
    pub fn wait_budget(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::WaitBudget,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A task-definition attribute only the service may populate was dropped.
    ServerManagedAttribute,
    /// The wait budget was computed from incomplete deployment-group data.
    WaitBudget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_starts_empty() {
        let diag = Diagnostics::default();
        assert!(!diag.has_warnings());
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn diagnostics_collects_warnings() {
        let mut diag = Diagnostics::default();

        diag.warn(Warning::server_managed_attribute("dropped 'revision'"));
        diag.warn(Warning::wait_budget("no blue/green configuration"));

        assert!(diag.has_warnings());
        assert_eq!(diag.warnings().len(), 2);
        assert_eq!(diag.warnings()[0].kind, WarningKind::ServerManagedAttribute);
        assert_eq!(diag.warnings()[1].kind, WarningKind::WaitBudget);
    }
}

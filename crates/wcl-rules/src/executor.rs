//! Rule executor
//!
//! Runs every registered rule against one snapshot and partitions the
//! findings by severity. A run is a pure fold: it never mutates the snapshot
//! and two runs over the same snapshot return identical results.

use serde::Serialize;
use wcl_config::Snapshot;

use crate::issue::{Issue, Severity};
use crate::registry::RuleRegistry;
use crate::status::ValidationStatus;

/// Issues of one run, split by severity, each list in registry order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Issues that would crash or no-op the simulation
    pub errors: Vec<Issue>,

    /// Issues that degrade coherence
    pub warnings: Vec<Issue>,
}

impl ValidationResult {
    /// Overall status
    #[inline]
    #[must_use]
    pub fn status(&self) -> ValidationStatus {
        ValidationStatus::of(self)
    }

    /// Number of error issues
    #[inline]
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Number of warning issues
    #[inline]
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Number of issues of either severity
    #[inline]
    #[must_use]
    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Number of affected items across all issues
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.issues().map(Issue::item_count).sum()
    }

    /// Errors first, then warnings
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.errors.iter().chain(&self.warnings)
    }

    /// Find issue by id
    #[must_use]
    pub fn issue(&self, id: &str) -> Option<&Issue> {
        self.issues().find(|i| i.id == id)
    }
}

/// Evaluates a registry of rules
#[derive(Debug)]
pub struct RuleExecutor {
    registry: RuleRegistry,
}

impl RuleExecutor {
    /// Create executor over a registry
    #[inline]
    #[must_use]
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// Create executor over the built-in rules
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(RuleRegistry::with_defaults())
    }

    /// Registry being run
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Run every rule
    #[must_use]
    pub fn run(&self, snapshot: &Snapshot) -> ValidationResult {
        let mut result = ValidationResult::default();

        for rule in self.registry.iter() {
            let Some(issue) = rule.check(snapshot).into_issue() else {
                continue;
            };
            tracing::debug!("Rule {} flagged {} item(s)", issue.id, issue.item_count());
            match issue.severity {
                Severity::Error => result.errors.push(issue),
                Severity::Warning => result.warnings.push(issue),
            }
        }

        tracing::info!(
            "Validation finished: {} error(s), {} warning(s), status {}",
            result.error_count(),
            result.warning_count(),
            result.status()
        );

        result
    }
}

impl Default for RuleExecutor {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Run the built-in rules against a snapshot
#[must_use]
pub fn validate(snapshot: &Snapshot) -> ValidationResult {
    RuleExecutor::with_defaults().run(snapshot)
}

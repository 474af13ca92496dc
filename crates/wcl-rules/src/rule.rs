//! Rule trait and core types
//!
//! Provides the [`Rule`] trait every consistency check implements. Rules are
//! stateless values: they read a snapshot and either find nothing or return
//! exactly one [`Issue`].

use wcl_config::Snapshot;

use crate::issue::{AffectedItem, Issue, Severity};

/// A consistency check over a configuration snapshot
///
/// Implementations must be deterministic: the same snapshot always yields
/// the same outcome, with affected items in the same order.
pub trait Rule: Send + Sync + std::fmt::Debug {
    /// Issue id emitted by this rule (e.g. `invalidEntityKind`)
    fn id(&self) -> &'static str;

    /// Short issue title
    fn title(&self) -> &'static str;

    /// Issue message explaining the consequence
    fn message(&self) -> &'static str;

    /// Rule category
    fn category(&self) -> RuleCategory;

    /// Evaluate against a snapshot
    fn check(&self, snapshot: &Snapshot) -> RuleOutcome;

    /// Severity of emitted issues
    fn severity(&self) -> Severity {
        self.category().severity()
    }

    /// Wrap affected items into an outcome; no items means clean
    fn outcome(&self, affected_items: Vec<AffectedItem>) -> RuleOutcome {
        if affected_items.is_empty() {
            return RuleOutcome::Clean;
        }
        RuleOutcome::Finding(Issue {
            id: self.id().to_string(),
            title: self.title().to_string(),
            message: self.message().to_string(),
            severity: self.severity(),
            affected_items,
        })
    }
}

/// Result of evaluating one rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Nothing found
    Clean,

    /// One issue with at least one affected item
    Finding(Issue),
}

impl RuleOutcome {
    /// Whether nothing was found
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }

    /// Issue, if any
    #[inline]
    #[must_use]
    pub fn into_issue(self) -> Option<Issue> {
        match self {
            Self::Clean => None,
            Self::Finding(issue) => Some(issue),
        }
    }

    /// Borrow the issue, if any
    #[inline]
    #[must_use]
    pub fn issue(&self) -> Option<&Issue> {
        match self {
            Self::Clean => None,
            Self::Finding(issue) => Some(issue),
        }
    }
}

/// Rule categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCategory {
    /// Malformed shape or dangling reference
    Format,

    /// Simulation dynamics that degenerate
    Balance,

    /// Softer authoring mistakes
    Quality,
}

impl RuleCategory {
    /// Severity of issues in this category
    #[inline]
    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Self::Format => Severity::Error,
            Self::Balance | Self::Quality => Severity::Warning,
        }
    }
}

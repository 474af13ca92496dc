//! Issue model
//!
//! An [`Issue`] is the normalized output of one rule: what is wrong, how bad
//! it is, and every concrete offending value as an [`AffectedItem`].

use serde::Serialize;

/// How an issue affects the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The simulation will crash or silently no-op
    Error,

    /// The simulation runs but loses coherence
    Warning,
}

impl Severity {
    /// Lowercase name (`error` / `warning`)
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Rule id, e.g. `invalidEntityKind`
    pub id: String,

    /// Short title
    pub title: String,

    /// Explanation of the consequence
    pub message: String,

    /// Severity
    pub severity: Severity,

    /// One entry per offending value or object
    pub affected_items: Vec<AffectedItem>,
}

impl Issue {
    /// Number of affected items
    #[inline]
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.affected_items.len()
    }

    /// Find affected item by id
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&AffectedItem> {
        self.affected_items.iter().find(|i| i.id == id)
    }
}

/// One concrete offending value within an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AffectedItem {
    /// Offending value or object id
    pub id: String,

    /// Display label
    pub label: String,

    /// Where it was found or what is wrong with it
    pub detail: String,
}

impl AffectedItem {
    /// Create affected item
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            detail: detail.into(),
        }
    }
}

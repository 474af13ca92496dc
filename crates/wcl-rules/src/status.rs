//! Status aggregation

use serde::Serialize;
use wcl_config::Snapshot;

use crate::executor::{validate, ValidationResult};

/// Overall status of a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    /// No issues
    Clean,

    /// Warnings only
    Warning,

    /// At least one error
    Error,
}

impl ValidationStatus {
    /// Derive the status of a result: errors dominate warnings
    #[must_use]
    pub fn of(result: &ValidationResult) -> Self {
        if !result.errors.is_empty() {
            Self::Error
        } else if !result.warnings.is_empty() {
            Self::Warning
        } else {
            Self::Clean
        }
    }

    /// Lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts without issue detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    /// Overall status
    pub status: ValidationStatus,

    /// Number of error issues
    pub error_count: usize,

    /// Number of warning issues
    pub warning_count: usize,

    /// Errors plus warnings
    pub total_issues: usize,
}

impl StatusSummary {
    /// Summarize a finished run
    #[must_use]
    pub fn from_result(result: &ValidationResult) -> Self {
        Self {
            status: ValidationStatus::of(result),
            error_count: result.error_count(),
            warning_count: result.warning_count(),
            total_issues: result.total_issues(),
        }
    }
}

/// Validate a snapshot and summarize it
///
/// Missing snapshot sections deserialize as empty, so a partial snapshot
/// is summarized rather than rejected.
#[must_use]
pub fn validation_status(snapshot: &Snapshot) -> StatusSummary {
    StatusSummary::from_result(&validate(snapshot))
}

//! Flattened report rows and the JSON report envelope

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use wcl_rules::ValidationResult;

/// One affected item with its issue's fields, ready for tabular output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatRow {
    /// `error` or `warning`
    pub severity: String,

    /// Issue id
    pub category: String,

    /// Issue title
    pub title: String,

    /// Issue message
    pub message: String,

    /// Affected item id
    pub item_id: String,

    /// Affected item label
    pub item_label: String,

    /// Affected item detail
    pub detail: String,
}

impl FlatRow {
    /// Cells in CSV column order
    #[must_use]
    pub fn cells(&self) -> [&str; 7] {
        [
            self.severity.as_str(),
            self.category.as_str(),
            self.title.as_str(),
            self.message.as_str(),
            self.item_id.as_str(),
            self.item_label.as_str(),
            self.detail.as_str(),
        ]
    }
}

/// One row per affected item, errors first, in issue order
#[must_use]
pub fn flatten(result: &ValidationResult) -> Vec<FlatRow> {
    result
        .issues()
        .flat_map(|issue| {
            issue.affected_items.iter().map(move |item| FlatRow {
                severity: issue.severity.to_string(),
                category: issue.id.clone(),
                title: issue.title.clone(),
                message: issue.message.clone(),
                item_id: item.id.clone(),
                item_label: item.label.clone(),
                detail: item.detail.clone(),
            })
        })
        .collect()
}

/// Counts heading a JSON report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Number of error issues
    pub error_count: usize,

    /// Number of warning issues
    pub warning_count: usize,

    /// Number of rows
    pub total_items: usize,
}

/// JSON export document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    /// RFC 3339 UTC timestamp
    pub exported_at: String,

    /// Counts
    pub summary: ReportSummary,

    /// Flattened rows
    pub issues: Vec<FlatRow>,
}

impl JsonReport {
    /// Build a report stamped with `at`
    #[must_use]
    pub fn new(result: &ValidationResult, at: DateTime<Utc>) -> Self {
        let issues = flatten(result);
        Self {
            exported_at: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            summary: ReportSummary {
                error_count: result.error_count(),
                warning_count: result.warning_count(),
                total_items: issues.len(),
            },
            issues,
        }
    }

    /// Build a report stamped with the current time
    #[must_use]
    pub fn now(result: &ValidationResult) -> Self {
        Self::new(result, Utc::now())
    }
}

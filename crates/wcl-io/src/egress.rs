//! Report serialization
//!
//! Exports never touch the validation result; they only read it.

use std::path::Path;

use chrono::{DateTime, Utc};
use wcl_rules::ValidationResult;

use crate::error::ExportError;
use crate::report::{flatten, JsonReport};

/// CSV header, in column order
pub const CSV_HEADER: [&str; 7] = [
    "Severity",
    "Category",
    "Title",
    "Message",
    "Item ID",
    "Item Label",
    "Detail",
];

/// Report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON report
    Json,

    /// Header row plus one row per affected item
    Csv,
}

impl ExportFormat {
    /// Conventional file extension
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Render a result in this format
    ///
    /// # Errors
    /// Returns an error when encoding fails.
    pub fn render(self, result: &ValidationResult, at: DateTime<Utc>) -> Result<String, ExportError> {
        match self {
            Self::Json => to_json(result, at),
            Self::Csv => to_csv(result),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown export format: '{other}'")),
        }
    }
}

/// Pretty JSON report stamped with `at`
///
/// # Errors
/// Returns [`ExportError::Json`] when encoding fails.
pub fn to_json(result: &ValidationResult, at: DateTime<Utc>) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&JsonReport::new(result, at))?)
}

/// CSV report
///
/// Fields containing a comma, quote or newline are quoted with inner quotes
/// doubled; records end in `\n`.
///
/// # Errors
/// Returns an error when encoding fails.
pub fn to_csv(result: &ValidationResult) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for row in flatten(result) {
        writer.write_record(row.cells())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Write a JSON report to `path`
///
/// # Errors
/// Fails when encoding or writing fails.
pub fn write_json(
    result: &ValidationResult,
    at: DateTime<Utc>,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    write_artifact(path.as_ref(), &to_json(result, at)?)
}

/// Write a CSV report to `path`
///
/// # Errors
/// Fails when encoding or writing fails.
pub fn write_csv(result: &ValidationResult, path: impl AsRef<Path>) -> Result<(), ExportError> {
    write_artifact(path.as_ref(), &to_csv(result)?)
}

fn write_artifact(path: &Path, content: &str) -> Result<(), ExportError> {
    std::fs::write(path, content).map_err(|e| ExportError::io_error(path, e))?;
    tracing::info!("Wrote report to {}", path.display());
    Ok(())
}

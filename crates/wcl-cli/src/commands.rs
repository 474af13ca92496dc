//! Subcommand bodies

use std::fmt::{self, Write as _};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use wcl_config::Snapshot;
use wcl_io::{load_snapshot, ExportFormat};
use wcl_rules::{validate, StatusSummary, ValidationResult, ValidationStatus};

fn load(path: &Path) -> anyhow::Result<Snapshot> {
    tracing::info!("Linting {}", path.display());
    load_snapshot(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Exit status for a run; warnings fail only when `strict`
pub(crate) fn exit_code(status: ValidationStatus, strict: bool) -> ExitCode {
    match status {
        ValidationStatus::Error => ExitCode::FAILURE,
        ValidationStatus::Warning if strict => ExitCode::FAILURE,
        ValidationStatus::Warning | ValidationStatus::Clean => ExitCode::SUCCESS,
    }
}

/// Human-readable listing of a result
pub(crate) fn render_text(
    result: &ValidationResult,
    snapshot: &Snapshot,
) -> Result<String, fmt::Error> {
    let mut out = String::new();

    for issue in result.issues() {
        writeln!(
            out,
            "{} {}: {} ({})",
            issue.severity,
            issue.id,
            issue.title,
            issue.item_count()
        )?;
        writeln!(out, "  {}", issue.message)?;
        for item in &issue.affected_items {
            if item.label == item.id {
                write!(out, "  - {}", item.id)?;
            } else {
                write!(out, "  - {} [{}]", item.id, item.label)?;
            }
            if item.detail.is_empty() {
                out.push('\n');
            } else {
                writeln!(out, ": {}", item.detail)?;
            }
        }
    }

    let orphans = snapshot
        .usage_map
        .as_ref()
        .map_or(0, |m| m.validation.orphans.len());
    if orphans > 0 {
        writeln!(out, "usage map lists {orphans} orphan(s)")?;
    }

    writeln!(
        out,
        "{}: {} error(s), {} warning(s)",
        result.status(),
        result.error_count(),
        result.warning_count()
    )?;
    Ok(out)
}

pub(crate) fn check(path: &Path, strict: bool) -> anyhow::Result<ExitCode> {
    let snapshot = load(path)?;
    let result = validate(&snapshot);
    print!("{}", render_text(&result, &snapshot)?);
    Ok(exit_code(result.status(), strict))
}

pub(crate) fn status(path: &Path, json: bool) -> anyhow::Result<ExitCode> {
    let snapshot = load(path)?;
    let summary = StatusSummary::from_result(&validate(&snapshot));

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Status: {}", summary.status);
        println!("  Errors: {}", summary.error_count);
        println!("  Warnings: {}", summary.warning_count);
        println!("  Total issues: {}", summary.total_issues);
    }

    Ok(exit_code(summary.status, false))
}

pub(crate) fn export(
    path: &Path,
    format: ExportFormat,
    out: Option<&Path>,
) -> anyhow::Result<ExitCode> {
    let snapshot = load(path)?;
    let result = validate(&snapshot);
    let at = chrono::Utc::now();

    match (format, out) {
        (ExportFormat::Json, Some(out)) => wcl_io::write_json(&result, at, out)?,
        (ExportFormat::Csv, Some(out)) => wcl_io::write_csv(&result, out)?,
        (format, None) => print!("{}", format.render(&result, at)?),
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wcl_test_utils::clean_snapshot;

    #[test]
    fn strict_fails_on_warnings() {
        assert_eq!(exit_code(ValidationStatus::Warning, true), ExitCode::FAILURE);
        assert_eq!(exit_code(ValidationStatus::Warning, false), ExitCode::SUCCESS);
        assert_eq!(exit_code(ValidationStatus::Error, false), ExitCode::FAILURE);
        assert_eq!(exit_code(ValidationStatus::Clean, true), ExitCode::SUCCESS);
    }

    #[test]
    fn clean_snapshot_renders_summary_only() {
        let snapshot = clean_snapshot();
        let text = render_text(&validate(&snapshot), &snapshot).unwrap();
        assert_eq!(text, "clean: 0 error(s), 0 warning(s)\n");
    }

    #[test]
    fn renders_items_and_orphan_count() {
        let snapshot = Snapshot::from_json(
            r#"{
                "pressures": [{"id": "fear", "name": "Fear", "decay": 0, "growth": {}}],
                "usageMap": {"validation": {"orphans": [{"type": "system", "id": "s9"}]}}
            }"#,
        )
        .unwrap();
        let text = render_text(&validate(&snapshot), &snapshot).unwrap();

        assert!(text.contains("warning pressureWithoutSources: Pressures without sources (1)\n"));
        assert!(text.contains("  - fear [Fear]: "));
        assert!(text.contains("usage map lists 1 orphan(s)\n"));
        assert!(text.ends_with("warning: 0 error(s), 2 warning(s)\n"));
    }

    #[test]
    fn export_writes_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("world.yaml");
        std::fs::write(&input, "pressures:\n  - id: fear\n    decay: 0\n").unwrap();
        let out = dir.path().join("report.csv");

        let code = export(&input, ExportFormat::Csv, Some(&out)).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(std::fs::read_to_string(&out).unwrap().lines().count(), 3);
    }

    #[test]
    fn check_reports_load_failure_with_path() {
        let err = check(Path::new("/no/such/world.json"), false).unwrap_err();
        assert!(format!("{err:#}").contains("/no/such/world.json"));
    }
}

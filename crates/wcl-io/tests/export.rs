use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use wcl_io::{load_snapshot, to_csv, write_csv, write_json, CSV_HEADER};
use wcl_rules::{validate, AffectedItem, Issue, Severity, ValidationResult};

fn two_errors_one_warning() -> ValidationResult {
    ValidationResult {
        errors: vec![Issue {
            id: "invalidPressureId".into(),
            title: "Invalid pressure references".into(),
            message: "Changes are dropped, silently".into(),
            severity: Severity::Error,
            affected_items: vec![
                AffectedItem::new("dread", "dread", "Referenced by: generator \"g1\" (stateUpdates)"),
                AffectedItem::new("hope", "hope", "Referenced by: system \"s2\" (pressureChanges)"),
            ],
        }],
        warnings: vec![Issue {
            id: "orphanSystems".into(),
            title: "Orphan systems".into(),
            message: "Never run".into(),
            severity: Severity::Warning,
            affected_items: vec![AffectedItem::new("s2", "Storms", "")],
        }],
    }
}

#[test]
fn csv_has_header_plus_one_row_per_item() {
    let csv = to_csv(&two_errors_one_warning()).unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());

    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, CSV_HEADER.to_vec());

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][3], "Changes are dropped, silently");
    assert_eq!(&rows[1][6], "Referenced by: system \"s2\" (pressureChanges)");
    assert_eq!(&rows[2][0], "warning");
}

#[test]
fn json_file_summarizes_items() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

    write_json(&two_errors_one_warning(), at, &path).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["exportedAt"], "2024-01-02T03:04:05.000Z");
    assert_eq!(written["summary"]["errorCount"], 1);
    assert_eq!(written["summary"]["warningCount"], 1);
    assert_eq!(written["summary"]["totalItems"], 3);
    assert_eq!(written["issues"].as_array().unwrap().len(), 3);
    assert_eq!(written["issues"][0]["category"], "invalidPressureId");
}

#[test]
fn csv_file_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");

    write_csv(&two_errors_one_warning(), &path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, to_csv(&two_errors_one_warning()).unwrap());
    assert_eq!(content.lines().count(), 4);
}

#[test]
fn write_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("report.csv");
    let err = write_csv(&ValidationResult::default(), &path).unwrap_err();
    assert!(matches!(err, wcl_io::ExportError::Io { .. }));
}

#[test]
fn load_validate_export() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("world.json");
    std::fs::write(
        &input,
        r#"{"pressures": [{"id": "fear", "decay": 0, "growth": {}}]}"#,
    )
    .unwrap();

    let snapshot = load_snapshot(&input).unwrap();
    let result = validate(&snapshot);
    let csv = to_csv(&result).unwrap();

    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("warning,pressureWithoutSources,"));
    assert!(csv.contains("warning,pressureWithoutSinks,"));
}

#[test]
fn clean_snapshot_exports_header_only() {
    let result = validate(&wcl_test_utils::clean_snapshot());
    assert_eq!(
        to_csv(&result).unwrap(),
        "Severity,Category,Title,Message,Item ID,Item Label,Detail\n"
    );
}

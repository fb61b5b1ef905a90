//! Snapshot version resolution against real directory layouts.

use chrono::{TimeZone, Utc};
use lqs_tools::{
    cli, group_versions, pipeline::discover_files, reports::ReportFormat, resolve_latest,
    AppConfig, FileDescriptor,
};
use std::path::Path;

const SNAPSHOTS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/snapshots");

fn descriptor(key: &str, day: u32) -> FileDescriptor {
    let modified = Utc.with_ymd_and_hms(2024, 6, day, 8, 30, 0).unwrap();
    FileDescriptor::from_key(key, 1024, modified)
}

#[test]
fn test_fixture_histories() {
    let files = discover_files(Path::new(SNAPSHOTS_DIR)).unwrap();
    let index = group_versions(&files);

    assert_eq!(index.product_count(), 3);
    assert_eq!(index.file_count(), 5);

    let legacy = index.history("B0LEGACY01").unwrap();
    let dates: Vec<&str> = legacy.iter().map(|v| v.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-01-20", "2024-02-15"]);
    assert_eq!(legacy[1].version, 2);
    assert_eq!(
        index.latest("B0CURRENT1").unwrap().file.name,
        "B0CURRENT1_2024-03-10.json"
    );
}

#[test]
fn test_nested_keys_group_by_file_name() {
    let files = vec![
        descriptor("2024/march/B0123ABCDE_2024-03-10.json", 1),
        descriptor("2024/january/B0123ABCDE_2024-01-05.json", 2),
        descriptor("archive/b0123abcde_20231201_101500.json", 3),
    ];
    let index = group_versions(&files);

    let history = index.history("B0123ABCDE").unwrap();
    let versions: Vec<(u32, &str)> = history
        .iter()
        .map(|v| (v.version, v.date.as_str()))
        .collect();
    assert_eq!(
        versions,
        vec![(1, "2023-12-01"), (2, "2024-01-05"), (3, "2024-03-10")]
    );
}

#[test]
fn test_undated_files_use_storage_time() {
    let files = vec![
        descriptor("B0123ABCDE.json", 20),
        descriptor("B0123ABCDE_2024-06-05.json", 1),
    ];
    let latest = resolve_latest(&files);
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].key, "B0123ABCDE.json");
}

#[test]
fn test_non_product_names_group_by_stem() {
    let files = vec![
        descriptor("listing-export.json", 1),
        descriptor("listing-export.JSON", 2),
    ];
    let index = group_versions(&files);
    assert_eq!(index.product_count(), 1);
    assert_eq!(index.history("listing-export").unwrap().len(), 2);
}

#[test]
fn test_versions_command_latest_only() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("latest.json");
    let config = AppConfig::builder()
        .output_format(ReportFormat::Json)
        .output_file(Some(out.clone()))
        .quiet(true)
        .build();

    let code = cli::run_versions(Path::new(SNAPSHOTS_DIR), true, &config).unwrap();
    assert_eq!(code, 0);

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
    let latest = value.as_array().unwrap();
    assert_eq!(latest.len(), 3);
    assert!(latest
        .iter()
        .any(|v| v["file"]["name"] == "B0LEGACY01_jdoe_run2_20240215_093000.json"));
}

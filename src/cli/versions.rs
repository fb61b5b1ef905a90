//! Versions command handler.
//!
//! Lists the snapshot history of every product found under a directory.

use crate::config::{AppConfig, Validatable};
use crate::pipeline::{discover_files, exit_codes, should_use_color, write_output, OutputTarget};
use crate::reports::create_reporter_with_options;
use crate::versions::group_versions;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the versions command, returning the desired exit code.
pub fn run_versions(dir: &Path, latest_only: bool, config: &AppConfig) -> Result<i32> {
    config.ensure_valid()?;
    let files = discover_files(dir)
        .with_context(|| format!("Failed to list snapshots in {}", dir.display()))?;
    let index = group_versions(&files);
    tracing::info!(
        "Found {} product(s) across {} file(s)",
        index.product_count(),
        index.file_count()
    );

    let target = OutputTarget::from_option(config.output.file.clone());
    let reporter = create_reporter_with_options(
        config.output.format,
        should_use_color(config.output.no_color, &target),
    );
    let text = reporter.generate_versions_report(&index, latest_only, &config.report_config())?;
    write_output(&text, &target, config.behavior.quiet)?;

    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportFormat;

    #[test]
    fn test_run_versions_json() {
        let dir = tempfile::tempdir().unwrap();
        let snapshots = dir.path().join("snapshots");
        std::fs::create_dir(&snapshots).unwrap();
        for name in [
            "B0123ABCDE_2024-01-05.json",
            "B0123ABCDE_2024-03-10.json",
            "B0999ZZZZZ_john_test1_20240115_143000.json",
        ] {
            std::fs::write(snapshots.join(name), "{}").unwrap();
        }
        let out = dir.path().join("versions.json");
        let config = AppConfig::builder()
            .output_format(ReportFormat::Json)
            .output_file(Some(out.clone()))
            .quiet(true)
            .build();

        assert_eq!(run_versions(&snapshots, false, &config).unwrap(), 0);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(value["B0123ABCDE"][1]["date"], "2024-03-10");
        assert_eq!(value["B0999ZZZZZ"][0]["date"], "2024-01-15");
    }

    #[test]
    fn test_run_versions_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_versions(&dir.path().join("nope"), false, &AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to list snapshots"));
    }
}

//! Score command handler.
//!
//! Implements the `score` subcommand: score listing documents given as files
//! or directories and report the results.

use crate::config::{AppConfig, Validatable};
use crate::pipeline::{
    exit_codes, score_batch, should_use_color, write_output, BatchReport, OutputTarget,
    PipelineError, SourceFile,
};
use crate::quality::LqsScorer;
use crate::reports::{create_reporter_with_options, ReportGenerator};
use anyhow::Result;
use std::path::PathBuf;

/// Collect scoring sources from file and directory arguments.
///
/// Directories are searched recursively and, when `latest_only` is set,
/// reduced to the latest snapshot of each product. Files are always scored.
pub fn collect_sources(paths: &[PathBuf], latest_only: bool) -> Result<Vec<SourceFile>> {
    let mut sources = Vec::new();
    for path in paths {
        if path.is_dir() {
            sources.extend(SourceFile::from_dir(path, latest_only)?);
        } else {
            sources.push(SourceFile::from_path(path)?);
        }
    }
    Ok(sources)
}

/// Run the score command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_score(paths: &[PathBuf], config: &AppConfig) -> Result<i32> {
    config.ensure_valid()?;

    let sources = collect_sources(paths, config.batch.latest_only)?;
    if sources.is_empty() {
        let listed: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        return Err(PipelineError::NothingToScore {
            paths: listed.join(", "),
        }
        .into());
    }

    let scorer = LqsScorer::from_config(&config.scoring);
    let mut report = score_batch(&scorer, &sources);
    if report.entries.is_empty() {
        return Err(PipelineError::AllFailed {
            count: report.failures.len(),
        }
        .into());
    }
    if config.batch.include_statistics {
        report = report.with_statistics();
    }

    let target = OutputTarget::from_option(config.output.file.clone());
    let reporter = create_reporter_with_options(
        config.output.format,
        should_use_color(config.output.no_color, &target),
    );
    let single_file = paths.len() == 1 && !paths[0].is_dir();
    let text = render(reporter.as_ref(), &report, config, single_file)?;
    write_output(&text, &target, config.behavior.quiet)?;

    Ok(threshold_exit_code(&report, config.scoring.min_score))
}

fn render(
    reporter: &dyn ReportGenerator,
    report: &BatchReport,
    config: &AppConfig,
    single_file: bool,
) -> Result<String> {
    let report_config = config.report_config();
    let rendered = match report.entries.as_slice() {
        [entry] if single_file => reporter.generate_score_report(&entry.lqs, &report_config),
        _ => reporter.generate_batch_report(report, &report_config),
    };
    rendered.map_err(|e| {
        anyhow::Error::from(PipelineError::ReportFailed {
            source: anyhow::Error::new(e),
        })
    })
}

fn threshold_exit_code(report: &BatchReport, min_score: Option<f64>) -> i32 {
    let Some(threshold) = min_score else {
        return exit_codes::SUCCESS;
    };
    let below: Vec<_> = report.below(threshold).collect();
    for entry in &below {
        tracing::error!(
            "{} scored {:.1}, below minimum {:.1}",
            entry.product_id,
            entry.lqs.total,
            threshold
        );
    }
    if below.is_empty() {
        exit_codes::SUCCESS
    } else {
        exit_codes::BELOW_MIN_SCORE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportFormat;
    use std::fs;
    use std::path::Path;

    fn write_doc(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(
            &path,
            r#"{"ASIN":"B0123ABCDE","Content":{"title":"Travel Mug, 12 oz","bullet_points":["LEAK PROOF: keeps coffee hot for hours"]}}"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_collect_sources_mixes_files_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let snapshots = dir.path().join("snapshots");
        fs::create_dir(&snapshots).unwrap();
        write_doc(&snapshots, "B0123ABCDE_2024-01-05.json");
        write_doc(&snapshots, "B0123ABCDE_2024-03-10.json");
        let single = write_doc(dir.path(), "B0999ZZZZZ.json");

        let sources = collect_sources(&[snapshots.clone(), single.clone()], true).unwrap();
        assert_eq!(sources.len(), 2);
        let all = collect_sources(&[snapshots, single], false).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_run_score_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let doc = write_doc(dir.path(), "B0123ABCDE.json");
        let out = dir.path().join("out.json");
        let config = AppConfig::builder()
            .output_format(ReportFormat::Json)
            .output_file(Some(out.clone()))
            .quiet(true)
            .build();

        let code = run_score(&[doc], &config).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(value["asin"], "B0123ABCDE");
    }

    #[test]
    fn test_run_score_below_minimum() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "B0123ABCDE.json");
        let config = AppConfig::builder()
            .output_file(Some(dir.path().join("out.txt")))
            .min_score(Some(100.0))
            .quiet(true)
            .build();

        let code = run_score(&[dir.path().to_path_buf()], &config).unwrap();
        assert_eq!(code, exit_codes::BELOW_MIN_SCORE);
    }

    #[test]
    fn test_run_score_empty_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_score(&[dir.path().to_path_buf()], &AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("No listing documents found"));
    }

    #[test]
    fn test_run_score_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let doc = write_doc(dir.path(), "B0123ABCDE.json");
        let config = AppConfig::builder().min_score(Some(150.0)).build();
        assert!(run_score(&[doc], &config).is_err());
    }
}

//! Stats command handler.
//!
//! Computes aggregate statistics over a previously saved JSON report.

use crate::config::{AppConfig, Validatable};
use crate::pipeline::{exit_codes, should_use_color, write_output, BatchReport, OutputTarget};
use crate::quality::{stats, LqsResult};
use crate::reports::create_reporter_with_options;
use anyhow::{Context, Result};
use std::path::Path;

/// Extract results from a saved batch report, a bare list of results, or a
/// single result.
pub fn parse_saved_results(raw: &str) -> Result<Vec<LqsResult>> {
    if let Ok(report) = serde_json::from_str::<BatchReport>(raw) {
        return Ok(report.results());
    }
    if let Ok(results) = serde_json::from_str::<Vec<LqsResult>>(raw) {
        return Ok(results);
    }
    let single: LqsResult = serde_json::from_str(raw)
        .context("expected a batch report, a list of scores, or a single score")?;
    Ok(vec![single])
}

/// Run the stats command, returning the desired exit code.
pub fn run_stats(path: &Path, config: &AppConfig) -> Result<i32> {
    config.ensure_valid()?;
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let results = parse_saved_results(&raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Computing statistics over {} result(s)", results.len());

    let overview = stats::overview(&results);

    let target = OutputTarget::from_option(config.output.file.clone());
    let reporter = create_reporter_with_options(
        config.output.format,
        should_use_color(config.output.no_color, &target),
    );
    let text = reporter.generate_stats_report(&overview, &config.report_config())?;
    write_output(&text, &target, config.behavior.quiet)?;

    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PipelineDocument;
    use crate::quality::LqsScorer;
    use crate::reports::ReportFormat;

    fn result(asin: &str) -> LqsResult {
        LqsScorer::new().score(&PipelineDocument::new(
            asin,
            "Travel Mug, 12 oz",
            vec!["Keeps coffee hot".to_string()],
        ))
    }

    #[test]
    fn test_parse_saved_results_shapes() {
        let list = serde_json::to_string(&vec![result("B0000000001"), result("B0000000002")])
            .unwrap();
        assert_eq!(parse_saved_results(&list).unwrap().len(), 2);

        let single = serde_json::to_string(&result("B0000000001")).unwrap();
        assert_eq!(parse_saved_results(&single).unwrap().len(), 1);

        assert!(parse_saved_results("{\"unrelated\": true}").is_err());
    }

    #[test]
    fn test_run_stats_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scores.json");
        let list = vec![result("B0000000001"), result("B0000000002")];
        std::fs::write(&input, serde_json::to_string(&list).unwrap()).unwrap();
        let out = dir.path().join("stats.json");
        let config = AppConfig::builder()
            .output_format(ReportFormat::Json)
            .output_file(Some(out.clone()))
            .quiet(true)
            .build();

        assert_eq!(run_stats(&input, &config).unwrap(), 0);
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(value["totalEntries"], 2);
        assert_eq!(value["weakestComponents"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_run_stats_rejects_invalid_config() {
        let config = AppConfig::builder().min_score(Some(-5.0)).build();
        let err = run_stats(Path::new("unused.json"), &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::error::LqsError>(),
            Some(crate::error::LqsError::Validation(_))
        ));
    }
}

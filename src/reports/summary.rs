//! Summary and table report generators for shell output.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::pipeline::BatchReport;
use crate::quality::{Grade, LqsResult, StatisticsOverview};
use crate::versions::VersionIndex;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn grade_color(grade: Grade) -> &'static str {
    match grade {
        Grade::A | Grade::B => "green",
        Grade::C => "yellow",
        Grade::D | Grade::F => "red",
    }
}

const fn score_color(score: u32) -> &'static str {
    if score >= 80 {
        "green"
    } else if score >= 60 {
        "yellow"
    } else {
        "red"
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{count} {}", if count == 1 { one } else { many })
}

/// Truncate to at most `max_width` display columns, marking the cut with `...`.
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    if max_width > 3 {
        out.push_str("...");
    }
    out
}

/// Truncate and right-pad to exactly `width` display columns.
fn pad(s: &str, width: usize) -> String {
    let cut = truncate(s, width);
    let fill = width.saturating_sub(cut.width());
    format!("{cut}{}", " ".repeat(fill))
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn score_card(&self, result: &LqsResult, heading: &str, config: &ReportConfig) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(self.color(heading, "bold"));
        lines.push(self.color("─".repeat(48).as_str(), "dim"));
        lines.push(format!(
            "{}  {}  {}",
            self.color("LQS:", "cyan"),
            self.color(&format!("{:.1}", result.total), "bold"),
            self.color(
                &format!("{} ({})", result.grade.letter(), result.grade.description()),
                grade_color(result.grade)
            )
        ));

        lines.push(String::new());
        lines.push(self.color("Dimensions:", "bold"));
        for (dimension, dim) in result.dimensions.iter() {
            lines.push(format!(
                "  {} {}  x{:.2} = {:>4.1}",
                pad(dimension.label(), 22),
                self.color(&format!("{:>3}", dim.score), score_color(dim.score)),
                dim.weight,
                dim.weighted
            ));
            if config.show_breakdown && !dim.breakdown.is_empty() {
                let parts: Vec<String> = dim
                    .breakdown
                    .iter()
                    .map(|(name, value)| format!("{name} {value}"))
                    .collect();
                lines.push(self.color(&format!("      {}", parts.join(", ")), "dim"));
            }
        }

        if config.show_flags {
            let flags: Vec<_> = result.flags().collect();
            if !flags.is_empty() {
                lines.push(String::new());
                lines.push(self.color("Flags:", "bold"));
                for (dimension, flag) in flags {
                    lines.push(format!("  {} {flag}", self.color(&format!("[{dimension}]"), "dim")));
                }
            }
        }

        lines.push(String::new());
        if result.recommendations.is_empty() {
            lines.push(format!("  {}", self.color("No recommendations", "dim")));
        } else {
            lines.push(self.color("Recommendations:", "bold"));
            for (i, rec) in result.recommendations.iter().enumerate() {
                lines.push(format!(
                    "  {}. {} {}",
                    i + 1,
                    self.color(&format!("[{}]", rec.dimension), "yellow"),
                    rec.message
                ));
            }
        }
        lines
    }

    fn stats_lines(&self, overview: &StatisticsOverview) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(self.color("Statistics", "bold"));
        lines.push(self.color("─".repeat(48).as_str(), "dim"));
        lines.push(format!(
            "{}  {}",
            self.color("Entries:", "cyan"),
            overview.total_entries
        ));
        if overview.total_entries == 0 {
            return lines;
        }

        lines.push(String::new());
        lines.push(self.color("Dimension averages:", "bold"));
        for avg in &overview.dimension_averages {
            lines.push(format!(
                "  {} {:>5.1}",
                pad(avg.dimension.label(), 22),
                avg.average_score
            ));
        }

        for (title, ranked, color) in [
            ("Weakest components:", &overview.weakest_components, "red"),
            ("Strongest components:", &overview.strongest_components, "green"),
        ] {
            lines.push(String::new());
            lines.push(self.color(title, "bold"));
            for item in ranked {
                lines.push(format!(
                    "  {}. {} {}",
                    item.rank,
                    pad(
                        &format!("{} / {}", item.average.dimension.label(), item.average.sub_component),
                        44
                    ),
                    self.color(&format!("{:>5.1}", item.average.average_score), color)
                ));
            }
        }
        lines
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_score_report(
        &self,
        result: &LqsResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let heading = config
            .title
            .clone()
            .unwrap_or_else(|| format!("Listing Quality Score: {}", result.product_id));
        Ok(self.score_card(result, &heading, config).join("\n"))
    }

    fn generate_batch_report(
        &self,
        report: &BatchReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        let meta = &report.meta;
        lines.push(self.color(
            config.title.as_deref().unwrap_or("Listing Quality Batch"),
            "bold",
        ));
        lines.push(format!(
            "{}  {}, {} | {} scored, {} failed",
            self.color("Files:", "cyan"),
            plural(meta.total_files, "file", "files"),
            plural(meta.unique_products, "product", "products"),
            meta.processed,
            meta.failed
        ));

        let limit = config.max_items.unwrap_or(usize::MAX);
        for entry in report.entries.iter().take(limit) {
            lines.push(String::new());
            let heading = format!(
                "{} - {} ({})",
                entry.product_id, entry.product_name, entry.file_name
            );
            lines.extend(self.score_card(&entry.lqs, &heading, config));
        }
        if report.entries.len() > limit {
            lines.push(String::new());
            lines.push(self.color(
                &format!("... and {} more", report.entries.len() - limit),
                "dim",
            ));
        }

        if !report.failures.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Failures:", "bold"));
            for failure in &report.failures {
                lines.push(format!(
                    "  {} {}",
                    self.color(&failure.key, "red"),
                    failure.error
                ));
            }
        }

        if let Some(overview) = &report.statistics {
            lines.push(String::new());
            lines.extend(self.stats_lines(overview));
        }
        Ok(lines.join("\n"))
    }

    fn generate_versions_report(
        &self,
        index: &VersionIndex,
        latest_only: bool,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        lines.push(self.color("Snapshot Versions", "bold"));
        lines.push(format!(
            "{}  {}, {}",
            self.color("Found:", "cyan"),
            plural(index.product_count(), "product", "products"),
            plural(index.file_count(), "file", "files")
        ));

        for (product_id, history) in index.iter() {
            lines.push(String::new());
            lines.push(format!(
                "{} {}",
                self.color(product_id, "bold"),
                self.color(
                    &format!("({})", plural(history.len(), "version", "versions")),
                    "dim"
                )
            ));
            let shown = if latest_only {
                &history[history.len().saturating_sub(1)..]
            } else {
                history
            };
            for file in shown {
                let is_latest = file.version as usize == history.len();
                let marker = if is_latest {
                    self.color("latest", "green")
                } else {
                    String::new()
                };
                lines.push(format!(
                    "  v{:<3} {}  {}  {}",
                    file.version, file.date, file.file.key, marker
                ));
            }
        }
        Ok(lines.join("\n"))
    }

    fn generate_stats_report(
        &self,
        overview: &StatisticsOverview,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        Ok(self.stats_lines(overview).join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

/// Table reporter for compact terminal output
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn header(&self) -> Vec<String> {
        vec![
            format!(
                "{} {} {} {} {} {} {} {} {} {}",
                self.color(&pad("PRODUCT", 12), "bold"),
                self.color(&pad("NAME", 28), "bold"),
                self.color(&pad("LQS", 6), "bold"),
                self.color(&pad("GRADE", 5), "bold"),
                self.color(&pad("KW", 4), "bold"),
                self.color(&pad("USP", 4), "bold"),
                self.color(&pad("READ", 4), "bold"),
                self.color(&pad("COMP", 4), "bold"),
                self.color(&pad("CUST", 4), "bold"),
                self.color(&pad("RULES", 5), "bold"),
            ),
            "─".repeat(85),
        ]
    }

    fn row(&self, product_id: &str, name: &str, result: &LqsResult) -> String {
        let d = &result.dimensions;
        format!(
            "{} {} {} {} {:<4} {:<4} {:<4} {:<4} {:<4} {:<5}",
            pad(product_id, 12),
            pad(name, 28),
            pad(&format!("{:.1}", result.total), 6),
            self.color(&pad(result.grade.letter(), 5), grade_color(result.grade)),
            d.keyword_optimization.score,
            d.usp_effectiveness.score,
            d.readability.score,
            d.competitive_position.score,
            d.customer_alignment.score,
            d.compliance.score,
        )
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TableReporter {
    fn generate_score_report(
        &self,
        result: &LqsResult,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = self.header();
        lines.push(self.row(&result.product_id, "-", result));
        Ok(lines.join("\n"))
    }

    fn generate_batch_report(
        &self,
        report: &BatchReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = self.header();
        let limit = config.max_items.unwrap_or(usize::MAX);
        for entry in report.entries.iter().take(limit) {
            lines.push(self.row(&entry.product_id, &entry.product_name, &entry.lqs));
        }
        for failure in &report.failures {
            lines.push(format!(
                "{} {}",
                self.color(&pad(&failure.key, 41), "red"),
                self.color("failed to load", "dim")
            ));
        }

        lines.push(String::new());
        let average = if report.entries.is_empty() {
            0.0
        } else {
            report.entries.iter().map(|e| e.lqs.total).sum::<f64>() / report.entries.len() as f64
        };
        lines.push(format!(
            "Total: {} scored, {} failed | Average LQS: {:.1}",
            report.meta.processed, report.meta.failed, average
        ));
        Ok(lines.join("\n"))
    }

    fn generate_versions_report(
        &self,
        index: &VersionIndex,
        latest_only: bool,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = vec![
            format!(
                "{} {} {} {}",
                self.color(&pad("PRODUCT", 12), "bold"),
                self.color(&pad("VERSION", 8), "bold"),
                self.color(&pad("DATE", 11), "bold"),
                self.color("KEY", "bold"),
            ),
            "─".repeat(85),
        ];
        for (product_id, history) in index.iter() {
            let shown = if latest_only {
                &history[history.len().saturating_sub(1)..]
            } else {
                history
            };
            for file in shown {
                lines.push(format!(
                    "{} {} {} {}",
                    pad(product_id, 12),
                    pad(&format!("v{}", file.version), 8),
                    pad(&file.date, 11),
                    file.file.key
                ));
            }
        }
        Ok(lines.join("\n"))
    }

    fn generate_stats_report(
        &self,
        overview: &StatisticsOverview,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = vec![
            format!(
                "{} {} {} {}",
                self.color(&pad("DIMENSION", 22), "bold"),
                self.color(&pad("COMPONENT", 26), "bold"),
                self.color(&pad("AVG", 6), "bold"),
                self.color("N", "bold"),
            ),
            "─".repeat(60),
        ];
        for avg in &overview.sub_component_averages {
            lines.push(format!(
                "{} {} {} {}",
                pad(avg.dimension.label(), 22),
                pad(&avg.sub_component, 26),
                pad(&format!("{:.1}", avg.average_score), 6),
                avg.sample_size
            ));
        }
        lines.push(String::new());
        lines.push(format!("Total: {} entries", overview.total_entries));
        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PipelineDocument;
    use crate::quality::{stats, LqsScorer};
    use crate::versions::{group_versions, FileDescriptor};
    use chrono::{TimeZone, Utc};

    fn sample() -> LqsResult {
        LqsScorer::new().score(&PipelineDocument::new(
            "B0123ABCDE",
            "<b>MUG</b>",
            vec!["LEAK PROOF: keeps coffee hot for hours".to_string()],
        ))
    }

    #[test]
    fn test_truncate_and_pad() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long product name", 10), "a very ...");
        assert_eq!(pad("ab", 4), "ab  ");
        // wide characters count two columns
        assert_eq!(pad("日本語", 4).width(), 4);
    }

    #[test]
    fn test_summary_score_card() {
        let config = ReportConfig {
            show_flags: true,
            ..ReportConfig::default()
        };
        let text = SummaryReporter::new()
            .no_color()
            .generate_score_report(&sample(), &config)
            .unwrap();
        assert!(text.contains("Listing Quality Score: B0123ABCDE"));
        assert!(text.contains("Keyword Optimization"));
        assert!(text.contains("Flags:"));
        assert!(text.contains("HTML tags found in content"));
        assert!(!text.contains("\x1b["));
    }

    #[test]
    fn test_summary_uses_color() {
        let text = SummaryReporter::new()
            .generate_score_report(&sample(), &ReportConfig::default())
            .unwrap();
        assert!(text.contains("\x1b[1m"));
    }

    #[test]
    fn test_table_row_per_result() {
        let text = TableReporter::new()
            .no_color()
            .generate_score_report(&sample(), &ReportConfig::default())
            .unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("B0123ABCDE"));
    }

    #[test]
    fn test_versions_report_marks_latest() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let index = group_versions(&[
            FileDescriptor::from_key("B0123ABCDE_2024-03-10.json", 1, at),
            FileDescriptor::from_key("B0123ABCDE_2024-01-05.json", 1, at),
        ]);
        let text = SummaryReporter::new()
            .no_color()
            .generate_versions_report(&index, false, &ReportConfig::default())
            .unwrap();
        assert!(text.contains("B0123ABCDE (2 versions)"));
        assert!(text.contains("v2   2024-03-10  B0123ABCDE_2024-03-10.json  latest"));

        let latest = SummaryReporter::new()
            .no_color()
            .generate_versions_report(&index, true, &ReportConfig::default())
            .unwrap();
        assert!(!latest.contains("2024-01-05"));
    }

    #[test]
    fn test_stats_report() {
        let overview = stats::overview(&[sample()]);
        let text = SummaryReporter::new()
            .no_color()
            .generate_stats_report(&overview, &ReportConfig::default())
            .unwrap();
        assert!(text.contains("Entries:  1"));
        assert!(text.contains("Weakest components:"));

        let table = TableReporter::new()
            .no_color()
            .generate_stats_report(&overview, &ReportConfig::default())
            .unwrap();
        assert!(table.contains("Total: 1 entries"));
    }
}

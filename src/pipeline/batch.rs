//! Parallel batch scoring.
//!
//! Documents are loaded and scored independently on the rayon pool. A file
//! that fails to load is recorded as a failure and never aborts the batch.

use super::discover::describe_file;
use super::load::load_document;
use crate::error::Result;
use crate::model::DocumentAccessor;
use crate::quality::{stats, LqsResult, LqsScorer, StatisticsOverview};
use crate::versions::{resolve_latest, FileDescriptor};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A file queued for scoring.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Location on disk
    pub path: PathBuf,
    pub descriptor: FileDescriptor,
}

impl SourceFile {
    /// Queue a single file given directly by path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let parent = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(Self {
            path: path.to_path_buf(),
            descriptor: describe_file(parent, path)?,
        })
    }

    /// Queue every document under `root`, optionally only the latest version
    /// of each product.
    pub fn from_dir(root: &Path, latest_only: bool) -> Result<Vec<Self>> {
        let mut files = super::discover_files(root)?;
        if latest_only {
            let before = files.len();
            files = resolve_latest(&files);
            tracing::debug!(
                "Reduced {} file(s) to {} latest version(s) in {}",
                before,
                files.len(),
                root.display()
            );
        }
        Ok(files
            .into_iter()
            .map(|descriptor| Self {
                path: root.join(&descriptor.key),
                descriptor,
            })
            .collect())
    }
}

/// Listing copy carried alongside a score for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    pub title: String,
    pub bullet_points: Vec<String>,
    pub description: String,
    pub backend_keywords: Vec<String>,
}

/// One scored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msku: Option<String>,
    pub product_name: String,
    pub lqs: LqsResult,
    pub last_modified: DateTime<Utc>,
    pub file_name: String,
    /// Key the file was discovered under
    pub key: String,
    pub content: ContentSummary,
}

/// A document that could not be scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    pub key: String,
    pub error: String,
}

/// Batch bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMeta {
    pub total_files: usize,
    pub unique_products: usize,
    pub processed: usize,
    pub failed: usize,
    pub generated_at: DateTime<Utc>,
    pub engine_version: String,
}

/// Result of scoring many documents, highest score first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub entries: Vec<ScoreEntry>,
    #[serde(default)]
    pub failures: Vec<BatchFailure>,
    pub meta: BatchMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<StatisticsOverview>,
}

impl BatchReport {
    /// Scores of all entries, in report order.
    #[must_use]
    pub fn results(&self) -> Vec<LqsResult> {
        self.entries.iter().map(|e| e.lqs.clone()).collect()
    }

    /// Attach the statistics overview computed from the entries.
    #[must_use]
    pub fn with_statistics(mut self) -> Self {
        self.statistics = Some(stats::overview(&self.results()));
        self
    }

    /// Entries whose total falls below `min_score`.
    pub fn below(&self, min_score: f64) -> impl Iterator<Item = &ScoreEntry> {
        self.entries.iter().filter(move |e| e.lqs.total < min_score)
    }
}

fn score_one(scorer: &LqsScorer, source: &SourceFile) -> Result<ScoreEntry> {
    let doc = load_document(&source.path)?;
    let lqs = scorer.score(&doc);
    let accessor = DocumentAccessor::new(&doc);

    let product_id = if doc.asin.trim().is_empty() {
        source.descriptor.product_id.clone()
    } else {
        doc.asin.clone()
    };

    Ok(ScoreEntry {
        product_name: accessor.product_name(),
        msku: doc.msku.clone(),
        lqs,
        last_modified: source.descriptor.last_modified,
        file_name: source.descriptor.name.clone(),
        key: source.descriptor.key.clone(),
        content: ContentSummary {
            title: accessor.title().to_string(),
            bullet_points: accessor.bullets().to_vec(),
            description: accessor.description().to_string(),
            backend_keywords: accessor.backend_keywords(),
        },
        product_id,
    })
}

/// Score every source in parallel.
#[must_use]
pub fn score_batch(scorer: &LqsScorer, sources: &[SourceFile]) -> BatchReport {
    tracing::info!("Scoring {} document(s)", sources.len());

    let outcomes: Vec<std::result::Result<ScoreEntry, BatchFailure>> = sources
        .par_iter()
        .map(|source| {
            score_one(scorer, source).map_err(|e| {
                tracing::warn!("Failed to score {}: {}", source.path.display(), e);
                BatchFailure {
                    key: source.descriptor.key.clone(),
                    error: e.to_string(),
                }
            })
        })
        .collect();

    let (mut entries, mut failures) = (Vec::new(), Vec::new());
    for outcome in outcomes {
        match outcome {
            Ok(entry) => entries.push(entry),
            Err(failure) => failures.push(failure),
        }
    }
    entries.sort_by(|a, b| b.lqs.total.total_cmp(&a.lqs.total));

    let unique_products = sources
        .iter()
        .map(|s| s.descriptor.product_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    tracing::info!(
        "Scored {} document(s), {} failed",
        entries.len(),
        failures.len()
    );

    BatchReport {
        meta: BatchMeta {
            total_files: sources.len(),
            unique_products,
            processed: entries.len(),
            failed: failures.len(),
            generated_at: Utc::now(),
            engine_version: crate::quality::SCORING_ENGINE_VERSION.to_string(),
        },
        entries,
        failures,
        statistics: None,
    }
}

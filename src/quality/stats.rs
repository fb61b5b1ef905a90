//! Aggregate statistics across many scored listings.

use super::dimension::{round1, Dimension};
use super::scorer::LqsResult;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Number of entries in the weakest/strongest rankings.
pub const RANKING_SIZE: usize = 5;

/// Average score of one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionAverage {
    pub dimension: Dimension,
    /// One decimal
    pub average_score: f64,
    pub sample_size: usize,
}

/// Average of one named sub-score within a dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubScoreAverage {
    pub dimension: Dimension,
    pub sub_component: String,
    /// One decimal
    pub average_score: f64,
    pub sample_size: usize,
}

/// A sub-score average with its position in a ranking (1-based).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedSubScore {
    #[serde(flatten)]
    pub average: SubScoreAverage,
    pub rank: usize,
}

/// Everything the statistics view shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsOverview {
    pub dimension_averages: Vec<DimensionAverage>,
    pub sub_component_averages: Vec<SubScoreAverage>,
    pub weakest_components: Vec<RankedSubScore>,
    pub strongest_components: Vec<RankedSubScore>,
    pub total_entries: usize,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn add(&mut self, value: u32) {
        self.sum += f64::from(value);
        self.count += 1;
    }

    fn average(&self) -> f64 {
        round1(self.sum / self.count as f64)
    }
}

fn sort_descending<T>(items: &mut [T], key: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| key(b).total_cmp(&key(a)));
}

/// Average score per dimension, highest first.
#[must_use]
pub fn dimension_averages(results: &[LqsResult]) -> Vec<DimensionAverage> {
    let mut acc: IndexMap<Dimension, Accumulator> = IndexMap::new();
    for result in results {
        for (dimension, dim) in result.dimensions.iter() {
            acc.entry(dimension).or_default().add(dim.score);
        }
    }

    let mut averages: Vec<DimensionAverage> = acc
        .into_iter()
        .map(|(dimension, a)| DimensionAverage {
            dimension,
            average_score: a.average(),
            sample_size: a.count,
        })
        .collect();
    sort_descending(&mut averages, |a| a.average_score);
    averages
}

/// Average per (dimension, sub-score) pair, highest first.
#[must_use]
pub fn sub_score_averages(results: &[LqsResult]) -> Vec<SubScoreAverage> {
    let mut acc: IndexMap<(Dimension, String), Accumulator> = IndexMap::new();
    for result in results {
        for (dimension, dim) in result.dimensions.iter() {
            for (name, &value) in &dim.breakdown {
                acc.entry((dimension, name.clone())).or_default().add(value);
            }
        }
    }

    let mut averages: Vec<SubScoreAverage> = acc
        .into_iter()
        .map(|((dimension, sub_component), a)| SubScoreAverage {
            dimension,
            sub_component,
            average_score: a.average(),
            sample_size: a.count,
        })
        .collect();
    sort_descending(&mut averages, |a| a.average_score);
    averages
}

fn ranked(items: impl IntoIterator<Item = SubScoreAverage>) -> Vec<RankedSubScore> {
    items
        .into_iter()
        .take(RANKING_SIZE)
        .enumerate()
        .map(|(i, average)| RankedSubScore { average, rank: i + 1 })
        .collect()
}

/// The five lowest sub-score averages, lowest first.
#[must_use]
pub fn weakest_components(results: &[LqsResult]) -> Vec<RankedSubScore> {
    let mut averages = sub_score_averages(results);
    averages.sort_by(|a, b| a.average_score.total_cmp(&b.average_score));
    ranked(averages)
}

/// The five highest sub-score averages, highest first.
#[must_use]
pub fn strongest_components(results: &[LqsResult]) -> Vec<RankedSubScore> {
    ranked(sub_score_averages(results))
}

/// Full statistics overview; empty input yields empty lists.
#[must_use]
pub fn overview(results: &[LqsResult]) -> StatisticsOverview {
    if results.is_empty() {
        return StatisticsOverview::default();
    }
    StatisticsOverview {
        dimension_averages: dimension_averages(results),
        sub_component_averages: sub_score_averages(results),
        weakest_components: weakest_components(results),
        strongest_components: strongest_components(results),
        total_entries: results.len(),
    }
}

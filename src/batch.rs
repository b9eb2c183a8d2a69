//! Table-wide scoring and summary statistics.

use std::collections::BTreeMap;

use log::{debug, info};
use serde::Serialize;

use crate::config::{Metric, MetricSelection, MetricsConfig, Weights};
use crate::error::Result;
use crate::score::{evaluate, RowScores, TextPair};
use crate::segment::{JiebaSegmenter, Segmentation};
use crate::table::{ScoredTable, Table};

/// Mean of each selected metric over all rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SummaryStats(BTreeMap<Metric, f64>);

impl SummaryStats {
    fn from_scores(scores: &[RowScores], selection: &MetricSelection) -> Self {
        if scores.is_empty() {
            return Self::default();
        }
        let n = scores.len() as f64;
        Self(
            selection
                .iter()
                .map(|metric| {
                    let total: f64 = scores.iter().map(|s| s.get(metric)).sum();
                    (metric, total / n)
                })
                .collect(),
        )
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.0.get(&metric).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.0.iter().map(|(m, v)| (*m, *v))
    }
}

/// Scores tables of text pairs.
///
/// Holds the jieba handle so the dictionary is loaded at most once, on the
/// first batch that contains Han characters, and reused by later calls.
#[derive(Debug, Clone, Default)]
pub struct MetricsPipeline {
    dictionary: JiebaSegmenter,
}

impl MetricsPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dictionary(&self) -> &JiebaSegmenter {
        &self.dictionary
    }

    /// Chooses the segmentation for the given cells.
    pub fn segmentation_for<I, S>(&self, cells: I) -> Segmentation
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segmentation = Segmentation::for_cells(cells, &self.dictionary);
        if segmentation.is_dictionary() {
            info!("Han characters detected; applying jieba segmentation");
        }
        segmentation
    }

    /// Scores every row of `table` and summarises the selected metrics.
    ///
    /// The returned table holds a copy of the input cells with the four
    /// metric columns appended; row `i` of the output is row `i` of the input.
    pub fn compute(
        &self,
        table: &Table,
        candidate_col: &str,
        reference_col: &str,
        selection: &MetricSelection,
        weights: &Weights,
    ) -> Result<(ScoredTable, SummaryStats)> {
        let candidate_idx = table.column_index(candidate_col)?;
        let reference_idx = table.column_index(reference_col)?;

        let pairs: Vec<TextPair> = table
            .rows()
            .iter()
            .map(|row| TextPair::new(row[candidate_idx].as_str(), row[reference_idx].as_str()))
            .collect();

        let segmentation = self.segmentation_for(
            pairs
                .iter()
                .flat_map(|p| [p.candidate.as_str(), p.reference.as_str()]),
        );
        debug!(
            "Scoring {} rows ('{}' against '{}')",
            pairs.len(),
            candidate_col,
            reference_col
        );

        let scores: Vec<RowScores> = pairs
            .iter()
            .map(|pair| evaluate(pair, &segmentation, weights))
            .collect();
        let summary = SummaryStats::from_scores(&scores, selection);
        info!(
            "Scored {} rows; summarised {} metrics",
            scores.len(),
            summary.len()
        );

        Ok((ScoredTable::new(table.clone(), scores), summary))
    }

    pub fn compute_with(
        &self,
        table: &Table,
        config: &MetricsConfig,
    ) -> Result<(ScoredTable, SummaryStats)> {
        self.compute(
            table,
            &config.candidate_column,
            &config.reference_column,
            &config.metrics,
            &config.weights,
        )
    }
}

//! Cross-query aggregation

use serde::{Deserialize, Serialize};

use crate::config::PrecisionAtNConfig;
use crate::error::{RankEvalError, Result};
use crate::metrics::{PrecisionAtN, RankedListQualityMetric};
use crate::types::QualityResult;

/// Unweighted arithmetic mean of per-query scores
///
/// An empty input is an error: a zero mean would be indistinguishable from
/// every query scoring zero.
pub fn combine(scores: &[f64]) -> Result<f64> {
    if scores.is_empty() {
        return Err(RankEvalError::EmptyInput);
    }
    Ok(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// Aggregated quality metrics across all queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Metric name
    pub metric: String,
    /// Config the queries were evaluated with
    pub config: PrecisionAtNConfig,
    /// Number of queries evaluated
    pub query_count: usize,
    /// Mean Precision@N (PRIMARY METRIC)
    pub mean_precision: f64,
    /// Sum of relevant retrieved documents over all queries
    pub total_relevant_retrieved: usize,
    /// Sum of retrieved documents over all queries
    pub total_retrieved: usize,
    /// Queries whose retrieved subset was empty
    pub empty_queries: usize,
    /// Individual query results
    pub query_results: Vec<QualityResult>,
}

impl QualityReport {
    /// Aggregate metrics from individual query results
    ///
    /// Fails with `EmptyInput` when there are no query results.
    pub fn aggregate(metric: &PrecisionAtN, query_results: Vec<QualityResult>) -> Result<Self> {
        let overall = metric.combine(&query_results)?;
        let total_relevant_retrieved = query_results
            .iter()
            .map(|r| r.breakdown.relevant_retrieved)
            .sum();
        let total_retrieved = query_results.iter().map(|r| r.breakdown.retrieved).sum();
        let empty_queries = query_results
            .iter()
            .filter(|r| r.breakdown.retrieved == 0)
            .count();

        tracing::info!(
            metric = metric.name(),
            queries = query_results.len(),
            mean_precision = overall,
            "Aggregated query results"
        );

        Ok(Self {
            metric: metric.name().to_string(),
            config: *metric.config(),
            query_count: query_results.len(),
            mean_precision: overall,
            total_relevant_retrieved,
            total_retrieved,
            empty_queries,
            query_results,
        })
    }

    /// Format as a summary string
    pub fn format_summary(&self) -> String {
        format!(
            "P@{}: {:.3} | Relevant: {}/{} | Threshold: {} | Queries: {} (empty: {})",
            self.config.size(),
            self.mean_precision,
            self.total_relevant_retrieved,
            self.total_retrieved,
            self.config.relevance_threshold(),
            self.query_count,
            self.empty_queries
        )
    }
}

//! Ranking quality metrics
//!
//! Scores a query's ranked results against its relevance judgments and combines
//! per-query scores into one overall number.
//!
//! ## Modules
//!
//! - `precision` - Precision@N evaluator
//! - `aggregate` - Cross-query combination and the aggregated report

pub mod aggregate;
pub mod precision;

#[cfg(test)]
mod precision_tests;

pub use aggregate::{combine, QualityReport};
pub use precision::PrecisionAtN;

use crate::error::Result;
use crate::types::{DocumentScope, QualityResult, RankedResult, RelevanceJudgment};

/// Common interface for metrics that score a ranked list against judgments
///
/// Implementations are pure: evaluating the same inputs twice yields the same
/// result, and evaluation may run concurrently for different queries.
pub trait RankedListQualityMetric {
    /// Metric name used in reports
    fn name(&self) -> &'static str;

    /// Score one query's ranked results
    ///
    /// Only judgments inside `scope` are considered.
    fn evaluate(
        &self,
        query_id: &str,
        scope: &DocumentScope,
        results: &[RankedResult],
        judgments: &[RelevanceJudgment],
    ) -> QualityResult;

    /// Combine per-query results into an overall score (arithmetic mean by default)
    fn combine(&self, results: &[QualityResult]) -> Result<f64> {
        let scores: Vec<f64> = results.iter().map(|r| r.score).collect();
        combine(&scores)
    }
}

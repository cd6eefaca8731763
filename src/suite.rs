//! Evaluation suites: queries with ranked results and relevance judgments
//!
//! ## Suite File Format (JSON)
//!
//! ```json
//! {
//!   "metadata": {
//!     "name": "products",
//!     "description": "Judged queries for the product catalogue",
//!     "version": "1.0"
//!   },
//!   "metric": { "size": 10, "relevant_rating_threshold": 1 },
//!   "queries": [
//!     {
//!       "query_id": "red-shoes",
//!       "scope": { "collection": "products", "doc_type": "item" },
//!       "results": [
//!         { "collection": "products", "doc_type": "item", "id": "17" }
//!       ],
//!       "judgments": [
//!         { "collection": "products", "doc_type": "item", "id": "17", "grade": 2 }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! `results` are listed in rank order. `metric` is optional.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::config::{ParseMode, PrecisionAtNConfig};
use crate::metrics::{PrecisionAtN, QualityReport, RankedListQualityMetric};
use crate::types::{DocumentKey, DocumentScope, QualityResult, RankedResult, RelevanceJudgment};

/// A judged query and the ranked results returned for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteQuery {
    /// Query identifier used in reports
    pub query_id: String,
    /// Collection and type the query searched
    pub scope: DocumentScope,
    /// Returned documents, best first
    #[serde(default)]
    pub results: Vec<DocumentKey>,
    /// Relevance judgments for this query (may span several scopes)
    #[serde(default)]
    pub judgments: Vec<RelevanceJudgment>,
}

impl SuiteQuery {
    pub fn new(query_id: impl Into<String>, scope: DocumentScope) -> Self {
        Self {
            query_id: query_id.into(),
            scope,
            results: Vec::new(),
            judgments: Vec::new(),
        }
    }

    /// Ranked results with list positions as ranks
    pub fn ranked_results(&self) -> Vec<RankedResult> {
        RankedResult::from_keys(self.results.iter().cloned())
    }

    /// Judgments that fall inside the query's scope
    pub fn scoped_judgment_count(&self) -> usize {
        self.judgments
            .iter()
            .filter(|j| self.scope.contains(&j.key))
            .count()
    }

    /// Score this query with the given metric
    pub fn evaluate(&self, metric: &impl RankedListQualityMetric) -> QualityResult {
        metric.evaluate(
            &self.query_id,
            &self.scope,
            &self.ranked_results(),
            &self.judgments,
        )
    }
}

/// Metadata about a suite file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteMetadata {
    /// Name of the judged collection or project
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: String,
    /// Optional version
    #[serde(default)]
    pub version: String,
}

/// A complete evaluation suite that can be loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalSuite {
    /// Metadata about the suite
    pub metadata: SuiteMetadata,
    /// Metric parameters stored with the suite, kept undecoded so the caller
    /// picks the parse mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<serde_json::Value>,
    /// The queries
    pub queries: Vec<SuiteQuery>,
}

impl EvalSuite {
    /// Create a new suite
    pub fn new(name: impl Into<String>, queries: Vec<SuiteQuery>) -> Self {
        Self {
            metadata: SuiteMetadata {
                name: name.into(),
                description: String::new(),
                version: "1.0".to_string(),
            },
            metric: None,
            queries,
        }
    }

    /// Suite with metric parameters attached
    pub fn with_metric(mut self, config: PrecisionAtNConfig) -> Result<Self> {
        self.metric = Some(serde_json::to_value(config).context("Failed to serialize metric")?);
        Ok(self)
    }

    /// Decode the suite's `metric` section, if present
    pub fn metric_config(
        &self,
        mode: ParseMode,
    ) -> crate::error::Result<Option<PrecisionAtNConfig>> {
        self.metric
            .clone()
            .map(|value| PrecisionAtNConfig::from_json_value(value, mode))
            .transpose()
    }

    /// Load a suite from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read suite file: {}", path.display()))?;

        let suite: EvalSuite = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse suite file: {}", path.display()))?;

        suite
            .validate()
            .with_context(|| format!("Invalid suite file: {}", path.display()))?;

        Ok(suite)
    }

    /// Save the suite to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize suite")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write suite file: {}", path.display()))?;

        Ok(())
    }

    /// Check query ids are present and unique and the metric section parses
    pub fn validate(&self) -> Result<()> {
        self.metric_config(ParseMode::Lenient).context("Invalid metric section")?;

        let mut seen = HashSet::new();
        for (i, q) in self.queries.iter().enumerate() {
            if q.query_id.is_empty() {
                anyhow::bail!("Query {} has empty query_id", i);
            }
            if !seen.insert(q.query_id.as_str()) {
                anyhow::bail!("Duplicate query_id '{}'", q.query_id);
            }
        }
        Ok(())
    }

    /// Evaluate every query and aggregate the results
    pub fn run(&self, metric: &PrecisionAtN) -> Result<QualityReport> {
        let query_results: Vec<QualityResult> =
            self.queries.iter().map(|q| q.evaluate(metric)).collect();

        let report = QualityReport::aggregate(metric, query_results)
            .with_context(|| format!("Suite '{}' has no queries", self.metadata.name))?;
        Ok(report)
    }

    /// Total judgments across all queries
    pub fn judgment_count(&self) -> usize {
        self.queries.iter().map(|q| q.judgments.len()).sum()
    }

    /// Queries with no judgment inside their own scope
    pub fn unjudged_queries(&self) -> Vec<&str> {
        self.queries
            .iter()
            .filter(|q| q.scoped_judgment_count() == 0)
            .map(|q| q.query_id.as_str())
            .collect()
    }
}

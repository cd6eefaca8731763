//! Precision@N
//!
//! Fraction of the first `min(N, len)` ranked results whose judged grade meets
//! the relevance threshold. Unjudged results count as retrieved but not relevant.

use std::collections::HashMap;

use crate::config::PrecisionAtNConfig;
use crate::metrics::RankedListQualityMetric;
use crate::types::{
    DocumentKey, DocumentScope, PrecisionBreakdown, QualityResult, RankedResult,
    RelevanceJudgment,
};

/// Precision@N evaluator over an immutable config snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PrecisionAtN {
    config: PrecisionAtNConfig,
}

impl PrecisionAtN {
    pub const NAME: &'static str = "precision_at_n";

    pub fn new(config: PrecisionAtNConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PrecisionAtNConfig {
        &self.config
    }

    /// Grade lookup restricted to judgments inside `scope`
    ///
    /// When a key is judged more than once, the later judgment wins.
    fn scoped_grades<'a>(
        scope: &DocumentScope,
        judgments: &'a [RelevanceJudgment],
    ) -> HashMap<&'a DocumentKey, u32> {
        judgments
            .iter()
            .filter(|j| scope.contains(&j.key))
            .map(|j| (&j.key, j.grade))
            .collect()
    }
}

impl RankedListQualityMetric for PrecisionAtN {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn evaluate(
        &self,
        query_id: &str,
        scope: &DocumentScope,
        results: &[RankedResult],
        judgments: &[RelevanceJudgment],
    ) -> QualityResult {
        let grades = Self::scoped_grades(scope, judgments);

        let mut relevant_retrieved = 0;
        let mut unjudged = 0;
        let retrieved_subset = &results[..results.len().min(self.config.size())];

        for result in retrieved_subset {
            match grades.get(&result.key) {
                Some(&grade) if self.config.is_relevant(grade) => relevant_retrieved += 1,
                Some(_) => {}
                None => unjudged += 1,
            }
        }

        let retrieved = retrieved_subset.len();
        let score = if retrieved == 0 {
            0.0
        } else {
            relevant_retrieved as f64 / retrieved as f64
        };

        tracing::debug!(
            query_id,
            collection = %scope.collection,
            doc_type = %scope.doc_type,
            retrieved,
            relevant_retrieved,
            unjudged,
            "Evaluated precision@{}",
            self.config.size()
        );

        QualityResult {
            query_id: query_id.to_string(),
            score,
            breakdown: PrecisionBreakdown {
                relevant_retrieved,
                retrieved,
            },
        }
    }
}

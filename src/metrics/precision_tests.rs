//! Scenario tests for the Precision@N evaluator
//!
//! Run with: cargo test precision

#[cfg(test)]
mod tests {
    use crate::config::PrecisionAtNConfig;
    use crate::metrics::{PrecisionAtN, QualityReport, RankedListQualityMetric};
    use crate::types::{DocumentKey, DocumentScope, RankedResult, Rating, RelevanceJudgment};

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn scope() -> DocumentScope {
        DocumentScope::new("test", "testtype")
    }

    fn rated(collection: &str, doc_type: &str, id: &str, grade: u32) -> RelevanceJudgment {
        RelevanceJudgment::new(DocumentKey::new(collection, doc_type, id), grade)
    }

    /// Ranked results in judgment order, all re-homed into `scope`
    fn hits_for(judgments: &[RelevanceJudgment], scope: &DocumentScope) -> Vec<RankedResult> {
        RankedResult::from_keys(judgments.iter().map(|j| scope.key(j.key.id.clone())))
    }

    fn precision_at(size: usize) -> PrecisionAtN {
        PrecisionAtN::new(PrecisionAtNConfig::new(size).unwrap())
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "score was {}, expected {}",
            actual,
            expected
        );
    }

    // =========================================================================
    // SCORING
    // =========================================================================

    #[test]
    fn precision_single_relevant_hit() {
        let judgments = vec![RelevanceJudgment::rated(scope().key("0"), Rating::Relevant)];
        let hits = hits_for(&judgments, &scope());
        let result = precision_at(5).evaluate("id", &scope(), &hits, &judgments);

        assert_close(result.score, 1.0);
        assert_eq!(result.breakdown.relevant_retrieved, 1);
        assert_eq!(result.breakdown.retrieved, 1);
        assert_eq!(result.query_id, "id");
    }

    #[test]
    fn precision_all_five_relevant() {
        let judgments: Vec<_> = (0..5)
            .map(|i| RelevanceJudgment::rated(scope().key(i.to_string()), Rating::Relevant))
            .collect();
        let hits = hits_for(&judgments, &scope());
        let result = precision_at(5).evaluate("id", &scope(), &hits, &judgments);

        assert_close(result.score, 1.0);
        assert_eq!(result.breakdown.relevant_retrieved, 5);
        assert_eq!(result.breakdown.retrieved, 5);
    }

    #[test]
    fn precision_ignores_one_irrelevant_result() {
        let mut judgments: Vec<_> = (0..4)
            .map(|i| RelevanceJudgment::rated(scope().key(i.to_string()), Rating::Relevant))
            .collect();
        judgments.push(RelevanceJudgment::rated(scope().key("4"), Rating::Irrelevant));
        let hits = hits_for(&judgments, &scope());
        let result = precision_at(5).evaluate("id", &scope(), &hits, &judgments);

        assert_close(result.score, 4.0 / 5.0);
        assert_eq!(result.breakdown.relevant_retrieved, 4);
        assert_eq!(result.breakdown.retrieved, 5);
    }

    #[test]
    fn precision_raised_relevance_threshold() {
        // Grades 0..=4; with threshold 2 only documents 2, 3 and 4 qualify
        let judgments: Vec<_> = (0..5u32)
            .map(|grade| rated("test", "testtype", &grade.to_string(), grade))
            .collect();
        let config = PrecisionAtNConfig::new(5)
            .unwrap()
            .with_relevance_threshold(2)
            .unwrap();
        let result = PrecisionAtN::new(config).evaluate(
            "id",
            &scope(),
            &hits_for(&judgments, &scope()),
            &judgments,
        );

        assert_close(result.score, 3.0 / 5.0);
        assert_eq!(result.breakdown.relevant_retrieved, 3);
        assert_eq!(result.breakdown.retrieved, 5);
    }

    #[test]
    fn precision_threshold_is_monotonic() {
        let judgments: Vec<_> = (0..5u32)
            .map(|grade| rated("test", "testtype", &grade.to_string(), grade))
            .collect();
        let hits = hits_for(&judgments, &scope());

        let mut previous = usize::MAX;
        for threshold in 0..=6 {
            let config = PrecisionAtNConfig::builder()
                .size(5)
                .relevance_threshold(threshold)
                .build()
                .unwrap();
            let result = PrecisionAtN::new(config).evaluate("id", &scope(), &hits, &judgments);
            assert!(result.breakdown.relevant_retrieved <= previous);
            previous = result.breakdown.relevant_retrieved;
        }
        assert_eq!(previous, 0);
    }

    // =========================================================================
    // SCOPE FILTERING
    // =========================================================================

    #[test]
    fn precision_ignores_judgments_from_other_collection() {
        let judgments = vec![
            rated("test_other", "testtype", "0", 1),
            rated("test_other", "testtype", "1", 1),
            rated("test", "testtype", "0", 1),
            rated("test", "testtype", "1", 1),
            rated("test", "testtype", "2", 0),
        ];
        // Only the last three documents were returned by the search
        let hits = hits_for(&judgments[2..5], &scope());
        let result = precision_at(5).evaluate("id", &scope(), &hits, &judgments);

        assert_close(result.score, 2.0 / 3.0);
        assert_eq!(result.breakdown.relevant_retrieved, 2);
        assert_eq!(result.breakdown.retrieved, 3);
    }

    #[test]
    fn precision_ignores_judgments_from_other_type() {
        let judgments = vec![
            rated("test", "other_type", "0", 1),
            rated("test", "other_type", "1", 1),
            rated("test", "testtype", "0", 1),
            rated("test", "testtype", "1", 1),
            rated("test", "testtype", "2", 0),
        ];
        let hits = hits_for(&judgments[2..5], &scope());
        let result = precision_at(5).evaluate("id", &scope(), &hits, &judgments);

        assert_close(result.score, 2.0 / 3.0);
        assert_eq!(result.breakdown.relevant_retrieved, 2);
        assert_eq!(result.breakdown.retrieved, 3);
    }

    #[test]
    fn precision_out_of_scope_hit_is_not_relevant() {
        // A judged-relevant document that lives outside the evaluated scope
        let judgments = vec![rated("other", "testtype", "0", 1), rated("test", "testtype", "1", 1)];
        let hits = RankedResult::from_keys([
            DocumentKey::new("other", "testtype", "0"),
            scope().key("1"),
        ]);
        let result = precision_at(5).evaluate("id", &scope(), &hits, &judgments);

        assert_eq!(result.breakdown.relevant_retrieved, 1);
        assert_eq!(result.breakdown.retrieved, 2);
    }

    // =========================================================================
    // EDGE CASES
    // =========================================================================

    #[test]
    fn precision_no_rated_docs() {
        let result = precision_at(5).evaluate("id", &scope(), &[], &[]);

        assert_eq!(result.score, 0.0);
        assert_eq!(result.breakdown.relevant_retrieved, 0);
        assert_eq!(result.breakdown.retrieved, 0);
    }

    #[test]
    fn precision_unjudged_hits_count_as_retrieved() {
        let judgments = vec![rated("test", "testtype", "0", 1)];
        let hits =
            RankedResult::from_keys(["0", "unjudged-a", "unjudged-b"].map(|id| scope().key(id)));
        let result = precision_at(5).evaluate("id", &scope(), &hits, &judgments);

        assert_close(result.score, 1.0 / 3.0);
        assert_eq!(result.breakdown.relevant_retrieved, 1);
        assert_eq!(result.breakdown.retrieved, 3);
    }

    #[test]
    fn precision_hits_without_judgments() {
        let hits = RankedResult::from_keys(["0", "1"].map(|id| scope().key(id)));
        let result = precision_at(5).evaluate("id", &scope(), &hits, &[]);

        assert_eq!(result.score, 0.0);
        assert_eq!(result.breakdown.retrieved, 2);
    }

    #[test]
    fn precision_only_first_n_results_count() {
        // Relevant documents sit beyond the cutoff
        let judgments: Vec<_> = (0..6u32)
            .map(|i| rated("test", "testtype", &i.to_string(), u32::from(i >= 3)))
            .collect();
        let hits = hits_for(&judgments, &scope());
        let result = precision_at(3).evaluate("id", &scope(), &hits, &judgments);

        assert_eq!(result.score, 0.0);
        assert_eq!(result.breakdown.relevant_retrieved, 0);
        assert_eq!(result.breakdown.retrieved, 3);
    }

    #[test]
    fn precision_is_pure() {
        let judgments = vec![rated("test", "testtype", "0", 1), rated("test", "testtype", "1", 0)];
        let hits = hits_for(&judgments, &scope());
        let metric = precision_at(10);

        let first = metric.evaluate("id", &scope(), &hits, &judgments);
        let second = metric.evaluate("id", &scope(), &hits, &judgments);
        assert_eq!(first, second);
    }

    // =========================================================================
    // COMBINE
    // =========================================================================

    #[test]
    fn precision_combine_across_queries() {
        let metric = PrecisionAtN::default();
        let judgments = vec![rated("test", "testtype", "0", 1), rated("test", "testtype", "1", 0)];
        let results = vec![
            metric.evaluate("a", &scope(), &hits_for(&judgments, &scope()), &judgments),
            metric.evaluate("b", &scope(), &hits_for(&judgments[..1], &scope()), &judgments),
        ];

        assert_close(metric.combine(&results).unwrap(), (0.5 + 1.0) / 2.0);

        let report = QualityReport::aggregate(&metric, results).unwrap();
        assert_eq!(report.total_relevant_retrieved, 2);
        assert_eq!(report.total_retrieved, 3);
    }
}

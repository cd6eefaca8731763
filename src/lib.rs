//! Rank evaluation library
//!
//! Scores ranked search results against human relevance judgments with Precision@N.

pub mod config;
pub mod error;
pub mod metrics;
pub mod suite;
pub mod types;

pub use config::{ParseMode, PrecisionAtNConfig, PrecisionAtNConfigBuilder};
pub use error::{RankEvalError, Result};
pub use metrics::{combine, PrecisionAtN, QualityReport, RankedListQualityMetric};
pub use suite::{EvalSuite, SuiteQuery};
pub use types::{
    DocumentKey, DocumentScope, PrecisionBreakdown, QualityResult, RankedResult, Rating,
    RelevanceJudgment,
};

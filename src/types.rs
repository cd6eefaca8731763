//! Data model for rank evaluation
//!
//! Judgments and ranked results are joined on [`DocumentKey`], a structural
//! (collection, doc_type, id) triple. Equality is exact and case-sensitive.

use serde::{Deserialize, Serialize};

/// The (collection, doc_type) pair a query is evaluated within
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentScope {
    pub collection: String,
    pub doc_type: String,
}

impl DocumentScope {
    pub fn new(collection: impl Into<String>, doc_type: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            doc_type: doc_type.into(),
        }
    }

    /// Whether a document belongs to this scope
    pub fn contains(&self, key: &DocumentKey) -> bool {
        self.collection == key.collection && self.doc_type == key.doc_type
    }

    /// Key for a document id inside this scope
    pub fn key(&self, id: impl Into<String>) -> DocumentKey {
        DocumentKey {
            collection: self.collection.clone(),
            doc_type: self.doc_type.clone(),
            id: id.into(),
        }
    }
}

/// Document identity shared by judgments and search results
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentKey {
    pub collection: String,
    pub doc_type: String,
    pub id: String,
}

impl DocumentKey {
    pub fn new(
        collection: impl Into<String>,
        doc_type: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            collection: collection.into(),
            doc_type: doc_type.into(),
            id: id.into(),
        }
    }
}

/// Binary rating scale for raters that only mark documents relevant or not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Irrelevant,
    Relevant,
}

impl Rating {
    /// Grade ordinal used in judgments
    pub fn ordinal(&self) -> u32 {
        match self {
            Self::Irrelevant => 0,
            Self::Relevant => 1,
        }
    }
}

/// A human-assigned grade for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceJudgment {
    #[serde(flatten)]
    pub key: DocumentKey,
    pub grade: u32,
}

impl RelevanceJudgment {
    pub fn new(key: DocumentKey, grade: u32) -> Self {
        Self { key, grade }
    }

    /// Judgment on the binary scale
    pub fn rated(key: DocumentKey, rating: Rating) -> Self {
        Self::new(key, rating.ordinal())
    }
}

/// One entry of a search system's ranked output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedResult {
    #[serde(flatten)]
    pub key: DocumentKey,
    /// Position in the ranked list (0-indexed)
    pub rank: usize,
}

impl RankedResult {
    pub fn new(key: DocumentKey, rank: usize) -> Self {
        Self { key, rank }
    }

    /// Build a ranked list from keys in rank order
    pub fn from_keys(keys: impl IntoIterator<Item = DocumentKey>) -> Vec<Self> {
        keys.into_iter()
            .enumerate()
            .map(|(rank, key)| Self::new(key, rank))
            .collect()
    }
}

/// Diagnostic counts behind a Precision@N score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrecisionBreakdown {
    /// Retrieved documents judged at or above the threshold
    pub relevant_retrieved: usize,
    /// Documents in the retrieved subset (first `min(N, len)` results)
    pub retrieved: usize,
}

/// Quality of the ranking for a single query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityResult {
    pub query_id: String,
    /// Score in [0, 1]
    pub score: f64,
    pub breakdown: PrecisionBreakdown,
}

impl QualityResult {
    /// Format as a summary string
    pub fn format_summary(&self) -> String {
        format!(
            "{}: P@N {:.3} ({}/{} relevant)",
            self.query_id, self.score, self.breakdown.relevant_retrieved, self.breakdown.retrieved
        )
    }
}

//! Configuration for the Precision@N metric
//!
//! Defines the `{ "size": N, "relevant_rating_threshold": T }` wire shape and the
//! strict/lenient parsing modes used when reading it back.

use anyhow::Context;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{RankEvalError, Result};

/// Default result-set cutoff
pub const DEFAULT_SIZE: usize = 10;

/// Default minimum grade counted as relevant
pub const DEFAULT_RELEVANCE_THRESHOLD: u32 = 1;

/// Largest cutoff that survives both JSON and TOML (signed 64-bit integers)
pub const MAX_SIZE: u64 = i64::MAX as u64;

/// How unknown or missing fields are treated when parsing a config
///
/// - `Strict`: unknown fields are rejected and `relevant_rating_threshold` is required
/// - `Lenient`: unknown fields are ignored and the threshold falls back to its default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    Strict,
    #[default]
    Lenient,
}

/// Precision@N parameters
///
/// Immutable once built. Two configs with the same field values are equal and hash
/// the same, which is what makes `parse(serialize(c)) == c` hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct PrecisionAtNConfig {
    /// Number of top results considered as retrieved
    #[serde(rename = "size")]
    size: usize,

    /// Minimum judged grade counted as relevant (inclusive)
    #[serde(rename = "relevant_rating_threshold")]
    relevance_threshold: u32,
}

impl Default for PrecisionAtNConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
        }
    }
}

impl PrecisionAtNConfig {
    /// Config with the given cutoff and the default threshold
    pub fn new(size: usize) -> Result<Self> {
        Self::builder().size(size).build()
    }

    pub fn builder() -> PrecisionAtNConfigBuilder {
        PrecisionAtNConfigBuilder::default()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn relevance_threshold(&self) -> u32 {
        self.relevance_threshold
    }

    /// Copy of this config with a different relevance threshold
    pub fn with_relevance_threshold(self, relevance_threshold: u32) -> Result<Self> {
        Self::builder()
            .size(self.size)
            .relevance_threshold(relevance_threshold)
            .build()
    }

    /// Whether a judged grade meets the threshold
    pub fn is_relevant(&self, grade: u32) -> bool {
        grade >= self.relevance_threshold
    }

    /// Serialize to the JSON wire shape
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| RankEvalError::Serialize(e.to_string()))
    }

    /// Parse from the JSON wire shape
    pub fn from_json(json: &str, mode: ParseMode) -> Result<Self> {
        let raw: RawConfig =
            serde_json::from_str(json).map_err(|e| RankEvalError::Parse(e.to_string()))?;
        Self::from_raw(raw, mode)
    }

    /// Parse from an already-decoded JSON value, such as a section of a larger document
    pub fn from_json_value(value: serde_json::Value, mode: ParseMode) -> Result<Self> {
        let raw: RawConfig =
            serde_json::from_value(value).map_err(|e| RankEvalError::Parse(e.to_string()))?;
        Self::from_raw(raw, mode)
    }

    /// Parse from a TOML document with the same field names
    pub fn from_toml(content: &str, mode: ParseMode) -> Result<Self> {
        let raw: RawConfig =
            toml::from_str(content).map_err(|e| RankEvalError::Parse(e.to_string()))?;
        Self::from_raw(raw, mode)
    }

    /// Load config from TOML file
    pub fn load(path: &Path, mode: ParseMode) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read metric config: {:?}", path))?;
        let config = Self::from_toml(&content, mode)
            .with_context(|| format!("Failed to parse metric config: {:?}", path))?;
        Ok(config)
    }

    /// Save config to TOML file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write metric config: {:?}", path))?;
        Ok(())
    }

    fn from_raw(raw: RawConfig, mode: ParseMode) -> Result<Self> {
        if mode == ParseMode::Strict {
            if let Some(field) = raw.unknown.keys().next() {
                return Err(RankEvalError::Parse(format!("unknown field `{}`", field)));
            }
        }

        let size = raw
            .size
            .ok_or_else(|| RankEvalError::Parse("missing field `size`".to_string()))?;
        if size < 1 {
            return Err(RankEvalError::Parse(format!(
                "`size` must be a positive integer, got {}",
                size
            )));
        }

        let threshold = match (raw.relevant_rating_threshold, mode) {
            (Some(t), _) => t,
            (None, ParseMode::Strict) => {
                return Err(RankEvalError::Parse(
                    "missing field `relevant_rating_threshold`".to_string(),
                ))
            }
            (None, ParseMode::Lenient) => i64::from(DEFAULT_RELEVANCE_THRESHOLD),
        };
        if threshold < 0 {
            return Err(RankEvalError::Parse(format!(
                "`relevant_rating_threshold` must be non-negative, got {}",
                threshold
            )));
        }

        let size = usize::try_from(size)
            .map_err(|_| RankEvalError::Parse(format!("`size` out of range: {}", size)))?;
        let threshold = u32::try_from(threshold).map_err(|_| {
            RankEvalError::Parse(format!(
                "`relevant_rating_threshold` out of range: {}",
                threshold
            ))
        })?;

        Self::builder()
            .size(size)
            .relevance_threshold(threshold)
            .build()
            .map_err(|e| RankEvalError::Parse(e.to_string()))
    }
}

/// Builder for [`PrecisionAtNConfig`]
#[derive(Debug, Clone, Copy)]
pub struct PrecisionAtNConfigBuilder {
    size: usize,
    relevance_threshold: u32,
}

impl Default for PrecisionAtNConfigBuilder {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
        }
    }
}

impl PrecisionAtNConfigBuilder {
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn relevance_threshold(mut self, relevance_threshold: u32) -> Self {
        self.relevance_threshold = relevance_threshold;
        self
    }

    pub fn build(self) -> Result<PrecisionAtNConfig> {
        if self.size < 1 {
            return Err(RankEvalError::InvalidConfig(format!(
                "size must be at least 1, got {}",
                self.size
            )));
        }
        if self.size as u64 > MAX_SIZE {
            return Err(RankEvalError::InvalidConfig(format!(
                "size must be at most {}, got {}",
                MAX_SIZE, self.size
            )));
        }
        Ok(PrecisionAtNConfig {
            size: self.size,
            relevance_threshold: self.relevance_threshold,
        })
    }
}

/// Unvalidated wire form; signed so negative inputs surface as parse errors
#[derive(Debug, Deserialize)]
struct RawConfig {
    size: Option<i64>,
    relevant_rating_threshold: Option<i64>,
    #[serde(flatten)]
    unknown: BTreeMap<String, IgnoredAny>,
}

impl TryFrom<RawConfig> for PrecisionAtNConfig {
    type Error = RankEvalError;

    fn try_from(raw: RawConfig) -> Result<Self> {
        Self::from_raw(raw, ParseMode::Lenient)
    }
}

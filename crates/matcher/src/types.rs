use catalog::AssetDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a [`MatchResult`] was produced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    /// Embedding similarity picked the asset.
    Semantic,
    /// Tag/description containment picked the asset.
    Keyword,
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::Semantic => "semantic",
            MatchMethod::Keyword => "keyword",
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary strategy of an engine, fixed when the engine is built.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Try embeddings first, fall back to keywords on any failure.
    Semantic,
    /// No provider in this process; keywords only.
    KeywordOnly,
}

/// Engine output: `{ asset, method, score? }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    /// The chosen catalog entry.
    pub asset: AssetDescriptor,
    /// Which path produced it. Keyword results are degraded-quality matches.
    pub method: MatchMethod,
    /// Cosine similarity of the winner; only present on the semantic path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl MatchResult {
    pub fn semantic(asset: AssetDescriptor, score: f32) -> Self {
        Self {
            asset,
            method: MatchMethod::Semantic,
            score: Some(score),
        }
    }

    pub fn keyword(asset: AssetDescriptor) -> Self {
        Self {
            asset,
            method: MatchMethod::Keyword,
            score: None,
        }
    }
}

/// One row of a full semantic ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredAsset {
    pub asset: AssetDescriptor,
    pub score: f32,
}

/// Engine tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatchConfig {
    /// Embed catalog entries once and reuse them for every request.
    pub cache_catalog_embeddings: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            cache_catalog_embeddings: true,
        }
    }
}

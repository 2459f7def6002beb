use std::borrow::Cow;
use std::sync::Arc;
use std::time::Instant;

use catalog::Catalog;
use once_cell::sync::OnceCell;
use semantic::{cosine_similarity, EmbeddingProvider, EmbeddingVector, SemanticError};
use tracing::{debug, warn};

use crate::keyword::explain_keyword_match;
use crate::metrics::metrics_recorder;
use crate::types::{MatchConfig, MatchResult, MatchStrategy, ScoredAsset};


/// Resolves prompts to catalog entries.
///
/// The strategy is decided once at construction: an engine with a provider ranks by
/// embedding similarity and falls back to keywords on any semantic failure, an engine
/// without one goes straight to keywords. The engine is `Send + Sync` and is meant to
/// be shared behind an `Arc`.
pub struct MatchEngine {
    catalog: Arc<Catalog>,
    provider: Option<Arc<dyn EmbeddingProvider>>,
    config: MatchConfig,
    catalog_embeddings: OnceCell<Vec<EmbeddingVector>>,
}

impl MatchEngine {
    /// Engine with the default [`MatchConfig`]. `provider = None` means keyword-only.
    pub fn new(catalog: Arc<Catalog>, provider: Option<Arc<dyn EmbeddingProvider>>) -> Self {
        Self::with_config(catalog, provider, MatchConfig::default())
    }

    pub fn with_config(
        catalog: Arc<Catalog>,
        provider: Option<Arc<dyn EmbeddingProvider>>,
        config: MatchConfig,
    ) -> Self {
        Self {
            catalog,
            provider,
            config,
            catalog_embeddings: OnceCell::new(),
        }
    }

    pub fn keyword_only(catalog: Arc<Catalog>) -> Self {
        Self::new(catalog, None)
    }

    pub fn strategy(&self) -> MatchStrategy {
        if self.provider.is_some() {
            MatchStrategy::Semantic
        } else {
            MatchStrategy::KeywordOnly
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Drop cached catalog embeddings, e.g. after the provider was reset onto a new model.
    pub fn clear_embedding_cache(&mut self) {
        self.catalog_embeddings.take();
    }

    /// Pick the best catalog entry for `text`. Always returns a result.
    ///
    /// Semantic failures of any kind (provider unavailable, embedding failure, dimension
    /// mismatch) are logged and answered by the keyword matcher.
    pub fn find_best_match(&self, text: &str) -> MatchResult {
        let start = Instant::now();
        let strategy = self.strategy();

        let result = match strategy {
            MatchStrategy::Semantic => match self.try_semantic(text) {
                Ok(result) => result,
                Err(err) => {
                    warn!(error = %err, "semantic_fallback");
                    self.keyword_result(text)
                }
            },
            MatchStrategy::KeywordOnly => self.keyword_result(text),
        };

        let latency = start.elapsed();
        debug!(
            asset = %result.asset.id,
            method = %result.method,
            score = ?result.score,
            latency_us = latency.as_micros() as u64,
            "match_resolved"
        );
        if let Some(recorder) = metrics_recorder() {
            recorder.record_match(strategy, result.method, latency);
        }

        result
    }

    /// Semantic path only: the highest-similarity entry, earliest entry on ties.
    pub fn try_semantic(&self, text: &str) -> Result<MatchResult, SemanticError> {
        let scores = self.semantic_scores(text)?;

        let mut best: Option<(usize, f32)> = None;
        for (idx, score) in scores.into_iter().enumerate() {
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((idx, score));
            }
        }

        let (idx, score) = best.ok_or_else(|| {
            SemanticError::EmbeddingFailed("catalog produced no scores".into())
        })?;
        Ok(MatchResult::semantic(
            self.catalog.entries()[idx].clone(),
            score,
        ))
    }

    /// Every entry with its similarity to `text`, best first. Ties keep catalog order.
    pub fn rank_semantic(&self, text: &str) -> Result<Vec<ScoredAsset>, SemanticError> {
        let scores = self.semantic_scores(text)?;
        let mut ranked: Vec<ScoredAsset> = self
            .catalog
            .iter()
            .zip(scores)
            .map(|(asset, score)| ScoredAsset {
                asset: asset.clone(),
                score,
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(ranked)
    }

    fn keyword_result(&self, text: &str) -> MatchResult {
        let hit = explain_keyword_match(text, &self.catalog);
        debug!(asset = %hit.asset.id, reason = ?hit.reason, "keyword_match");
        MatchResult::keyword(hit.asset.clone())
    }

    /// Cosine similarity of `text` against every entry, in catalog order.
    fn semantic_scores(&self, text: &str) -> Result<Vec<f32>, SemanticError> {
        let provider = self.provider.as_ref().ok_or_else(|| {
            SemanticError::ProviderUnavailable("no embedding provider configured".into())
        })?;

        let prompt = provider.embed(text)?;
        if prompt.is_zero() {
            return Err(SemanticError::EmbeddingFailed(
                "prompt embedding is all zeros".into(),
            ));
        }
        let embeddings = self.catalog_embeddings(provider.as_ref())?;

        let mut scores = Vec::with_capacity(embeddings.len());
        for (asset, embedding) in self.catalog.iter().zip(embeddings.iter()) {
            let score = cosine_similarity(prompt.as_slice(), embedding.as_slice())?;
            if !score.is_finite() {
                return Err(SemanticError::EmbeddingFailed(format!(
                    "non-finite similarity for asset '{}'",
                    asset.id
                )));
            }
            debug!(asset = %asset.id, score, "semantic_score");
            scores.push(score);
        }
        Ok(scores)
    }

    fn catalog_embeddings(
        &self,
        provider: &dyn EmbeddingProvider,
    ) -> Result<Cow<'_, [EmbeddingVector]>, SemanticError> {
        if self.config.cache_catalog_embeddings {
            // A failed embedding pass leaves the cell empty, so the next request retries.
            let cached = self
                .catalog_embeddings
                .get_or_try_init(|| self.embed_catalog(provider))?;
            Ok(Cow::Borrowed(cached.as_slice()))
        } else {
            Ok(Cow::Owned(self.embed_catalog(provider)?))
        }
    }

    fn embed_catalog(
        &self,
        provider: &dyn EmbeddingProvider,
    ) -> Result<Vec<EmbeddingVector>, SemanticError> {
        let texts: Vec<String> = self.catalog.iter().map(|a| a.composite_text()).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let embeddings = provider.embed_batch(&refs)?;
        if embeddings.len() != self.catalog.len() {
            return Err(SemanticError::EmbeddingFailed(format!(
                "provider returned {} embeddings for {} catalog entries",
                embeddings.len(),
                self.catalog.len()
            )));
        }
        if let Some((asset, _)) = self
            .catalog
            .iter()
            .zip(&embeddings)
            .find(|(_, embedding)| embedding.is_zero())
        {
            return Err(SemanticError::EmbeddingFailed(format!(
                "embedding for asset '{}' is all zeros",
                asset.id
            )));
        }
        debug!(
            entries = embeddings.len(),
            model = provider.model_name(),
            "catalog_embedded"
        );
        Ok(embeddings)
    }
}

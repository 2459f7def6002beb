//! Workspace umbrella crate for `assetmatch`.
//!
//! Stitches the catalog, embedding and matching crates together behind one entry point,
//! [`AssetMatcher`], and adds the caller-side concerns the engine leaves out: prompt
//! validation, YAML configuration, and a time budget for the semantic path.
//!
//! ```
//! use assetmatch::{AppConfig, AssetMatcher, EmbeddingMode, MatchMethod};
//!
//! let mut config = AppConfig::default();
//! config.semantic.mode = EmbeddingMode::Stub;
//!
//! let matcher = AssetMatcher::from_config(&config).unwrap();
//! let result = matcher.match_prompt("  a modern vase with flowers ").unwrap();
//! assert_eq!(result.asset.id, "vase");
//! assert_eq!(result.method, MatchMethod::Semantic);
//! ```

pub mod config;

pub use catalog::{AssetDescriptor, Catalog, CatalogError};
pub use matcher::{
    KeywordMatch, KeywordReason, MatchConfig, MatchEngine, MatchMethod, MatchMetrics,
    MatchResult, MatchStrategy, ScoredAsset, explain_keyword_match, match_by_keyword,
    set_match_metrics,
};
pub use semantic::{
    Capability, EmbeddingMode, EmbeddingProvider, EmbeddingVector, OnnxProvider,
    SemanticConfig, SemanticError, StubProvider, build_provider, cosine_similarity,
    detect_capability,
};

pub use crate::config::{AppConfig, ConfigLoadError};

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

/// Longest prompt accepted, in characters.
pub const MAX_PROMPT_CHARS: usize = 1000;

/// Prompts exercising every reference asset, including a few with no direct keyword.
pub const DEMO_PROMPTS: [&str; 12] = [
    "a wooden chair next to a desk",
    "a red apple on a table",
    "a modern vase with flowers",
    "an astronaut in space",
    "a desk lamp for studying",
    "a sturdy wooden table for dining",
    "something to sit on",
    "a piece of fruit",
    "decorative item for the home",
    "studying at a coffee shop",
    "exploring the milky way",
    "lighting for my office",
];

/// Rejected prompt input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("prompt is empty")]
    Empty,

    #[error("prompt is {len} characters long; the limit is {max}")]
    TooLong { len: usize, max: usize },
}

/// Failure while assembling an [`AssetMatcher`].
#[derive(Debug, Error)]
pub enum InitError {
    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("semantic: {0}")]
    Semantic(#[from] SemanticError),
}

/// Trim `prompt` and check it is non-empty and at most [`MAX_PROMPT_CHARS`] long.
pub fn validate_prompt(prompt: &str) -> Result<&str, PromptError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(PromptError::Empty);
    }
    let len = trimmed.chars().count();
    if len > MAX_PROMPT_CHARS {
        return Err(PromptError::TooLong {
            len,
            max: MAX_PROMPT_CHARS,
        });
    }
    Ok(trimmed)
}

/// Shared engine plus the caller-side policy around it.
///
/// Cheap to clone; clones share the engine and its cached catalog embeddings.
#[derive(Clone)]
pub struct AssetMatcher {
    engine: Arc<MatchEngine>,
    semantic_timeout: Option<Duration>,
}

impl AssetMatcher {
    pub fn new(engine: MatchEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            semantic_timeout: None,
        }
    }

    /// Load the catalog, probe the embedding backend once, and build the engine.
    pub fn from_config(config: &AppConfig) -> Result<Self, InitError> {
        let catalog = match &config.catalog.path {
            Some(path) => Catalog::from_file(path)?,
            None => Catalog::reference(),
        };
        let provider = build_provider(&config.semantic)?;
        let engine = MatchEngine::with_config(
            Arc::new(catalog),
            provider,
            config.matcher.match_config(),
        );
        info!(
            strategy = ?engine.strategy(),
            assets = engine.catalog().len(),
            "asset_matcher_ready"
        );
        Ok(Self {
            engine: Arc::new(engine),
            semantic_timeout: config.matcher.semantic_timeout(),
        })
    }

    pub fn with_semantic_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.semantic_timeout = timeout;
        self
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn semantic_timeout(&self) -> Option<Duration> {
        self.semantic_timeout
    }

    /// Validate `prompt` and resolve it on the current thread.
    pub fn match_prompt(&self, prompt: &str) -> Result<MatchResult, PromptError> {
        let prompt = validate_prompt(prompt)?;
        Ok(self.engine.find_best_match(prompt))
    }

    /// Validate `prompt` and resolve it on the blocking pool.
    ///
    /// If the semantic timeout elapses first the keyword result is returned; the
    /// abandoned semantic call still finishes in the background and warms the cache.
    pub async fn match_prompt_with_timeout(
        &self,
        prompt: &str,
    ) -> Result<MatchResult, PromptError> {
        let prompt = validate_prompt(prompt)?.to_owned();

        let engine = Arc::clone(&self.engine);
        let text = prompt.clone();
        let task = tokio::task::spawn_blocking(move || engine.find_best_match(&text));

        let joined = match self.semantic_timeout {
            Some(limit) => match tokio::time::timeout(limit, task).await {
                Ok(joined) => joined,
                Err(_) => {
                    warn!(
                        timeout_ms = limit.as_millis() as u64,
                        "semantic_timeout_keyword_fallback"
                    );
                    return Ok(self.keyword_result(&prompt));
                }
            },
            None => task.await,
        };

        Ok(match joined {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "match_task_failed");
                self.keyword_result(&prompt)
            }
        })
    }

    fn keyword_result(&self, prompt: &str) -> MatchResult {
        MatchResult::keyword(match_by_keyword(prompt, self.engine.catalog()).clone())
    }
}

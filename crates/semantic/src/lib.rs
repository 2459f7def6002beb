//! # Semantic Embeddings (`semantic`)
//!
//! Turns text into unit-length sentence embeddings and scores them against each other.
//! This is the semantic half of prompt-to-asset matching; the matcher crate owns the
//! keyword fallback and the decision of when to use which.
//!
//! Two backends implement [`EmbeddingProvider`]:
//!
//! - **ONNX** ([`OnnxProvider`]) - a local sentence-transformer (all-MiniLM-L6-v2 by
//!   default) run through ONNX Runtime. Mean-pooled over the attention mask, then
//!   L2-normalized. Loaded at most once per provider; a failed load stays failed until
//!   [`EmbeddingProvider::reset`] is called.
//! - **Stub** ([`StubProvider`]) - hashed bag-of-words vectors. No files, no setup,
//!   fully deterministic. Good for tests and offline demos.
//!
//! Which one a process gets is decided once at startup by [`build_provider`]: if the
//! configured ONNX assets are missing the process runs keyword-only and never asks
//! again.
//!
//! ## Quick example
//!
//! ```
//! use semantic::{cosine_similarity, EmbeddingProvider, StubProvider};
//!
//! let provider = StubProvider::new(384);
//! let a = provider.embed("a modern vase with flowers").unwrap();
//! let b = provider.embed("modern vase").unwrap();
//! let score = cosine_similarity(a.as_slice(), b.as_slice()).unwrap();
//! assert!(score > 0.0 && score <= 1.0);
//! ```

pub mod config;
pub mod error;
pub mod similarity;
pub mod types;

mod assets;
mod cache;
mod normalize;
mod onnx;
mod provider;
mod stub;

use std::sync::Arc;

use tracing::{info, warn};

pub use crate::assets::{detect_capability, Capability};
pub use crate::cache::ProviderStatus;
pub use crate::config::{EmbeddingMode, SemanticConfig};
pub use crate::error::SemanticError;
pub use crate::onnx::OnnxProvider;
pub use crate::provider::EmbeddingProvider;
pub use crate::similarity::cosine_similarity;
pub use crate::stub::StubProvider;
pub use crate::types::EmbeddingVector;

/// Build the process-wide provider for `cfg`, or `None` when semantic matching is not
/// available in this environment.
///
/// An invalid config is an error; missing ONNX assets are not (the caller runs
/// keyword-only and the reason is logged once here).
pub fn build_provider(
    cfg: &SemanticConfig,
) -> Result<Option<Arc<dyn EmbeddingProvider>>, SemanticError> {
    cfg.validate()?;

    if let Capability::KeywordOnly { reason } = detect_capability(cfg) {
        warn!(mode = ?cfg.mode, %reason, "semantic_unavailable");
        return Ok(None);
    }

    let provider: Arc<dyn EmbeddingProvider> = match cfg.mode {
        EmbeddingMode::Onnx => Arc::new(OnnxProvider::new(cfg.clone())),
        EmbeddingMode::Stub => Arc::new(StubProvider::from_config(cfg)?),
    };
    info!(mode = ?cfg.mode, model = %provider.model_name(), "semantic_provider_ready");
    Ok(Some(provider))
}

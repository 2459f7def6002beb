use crate::{EmbeddingVector, SemanticError};

/// Turns text into a unit-norm [`EmbeddingVector`].
///
/// Implementations are shared across requests behind an `Arc`, so they must be
/// `Send + Sync` and do any lazy initialization race-safely.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text.
    ///
    /// Fails with [`SemanticError::ProviderUnavailable`] when the model cannot be loaded and
    /// [`SemanticError::EmbeddingFailed`] when inference errors or the output is all zeros.
    fn embed(&self, text: &str) -> Result<EmbeddingVector, SemanticError>;

    /// Embed several texts, preserving order. The default embeds them one by one.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<EmbeddingVector>, SemanticError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    /// Label of the underlying model, for logs.
    fn model_name(&self) -> &str;

    /// Drop any loaded or failed state so the next call initializes again.
    fn reset(&self) {}
}

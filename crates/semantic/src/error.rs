use thiserror::Error;

/// Errors surfaced by embedding providers and the similarity scorer.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SemanticError {
    /// The model could not be loaded. Sticky for the provider until it is reset.
    #[error("embedding provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Inference failed for a specific text, or produced a degenerate (all-zero) vector.
    #[error("embedding failed: {0}")]
    EmbeddingFailed(String),
    /// Two vectors being compared have different lengths.
    #[error("dimension mismatch: {left} != {right}")]
    DimensionMismatch { left: usize, right: usize },
    /// The ONNX model file is not present locally.
    #[error("model file not found: {0}")]
    ModelNotFound(String),
    /// The tokenizer JSON is not present locally or could not be parsed.
    #[error("tokenizer missing: {0}")]
    TokenizerMissing(String),
    /// Configuration is inconsistent (e.g. zero dimensions).
    #[error("invalid semantic config: {0}")]
    InvalidConfig(String),
}

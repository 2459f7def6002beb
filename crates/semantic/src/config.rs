use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::SemanticError;

/// Which embedding backend to construct.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingMode {
    /// Local sentence-transformer inference through ONNX Runtime.
    #[default]
    Onnx,
    /// Deterministic hashed bag-of-words vectors; no model files needed.
    Stub,
}

/// Runtime configuration describing which model/tokenizer to use.
///
/// # Example
/// ```
/// use semantic::{EmbeddingMode, SemanticConfig};
///
/// let cfg = SemanticConfig {
///     mode: EmbeddingMode::Stub,
///     stub_dimensions: 128,
///     ..Default::default()
/// };
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SemanticConfig {
    /// Backend selector.
    pub mode: EmbeddingMode,
    /// Friendly label reported by the provider.
    pub model_name: String,
    /// Local path of the exported sentence-transformer ONNX file.
    pub model_path: PathBuf,
    /// Local path of the matching `tokenizer.json`.
    pub tokenizer_path: PathBuf,
    /// Token budget per text; longer inputs are truncated.
    pub max_sequence_length: usize,
    /// Vector width of the stub backend.
    pub stub_dimensions: usize,
    /// Feed a zeroed `token_type_ids` input (BERT-style exports declare it).
    pub use_token_type_ids: bool,
    /// ONNX Runtime intra-op thread count.
    pub intra_threads: usize,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            mode: EmbeddingMode::Onnx,
            model_name: "all-MiniLM-L6-v2".into(),
            model_path: PathBuf::from("./models/all-MiniLM-L6-v2/onnx/model.onnx"),
            tokenizer_path: PathBuf::from("./models/all-MiniLM-L6-v2/tokenizer.json"),
            max_sequence_length: 256,
            stub_dimensions: 384,
            use_token_type_ids: true,
            intra_threads: 2,
        }
    }
}

impl SemanticConfig {
    /// Reject settings no backend can work with.
    pub fn validate(&self) -> Result<(), SemanticError> {
        if self.max_sequence_length == 0 {
            return Err(SemanticError::InvalidConfig(
                "max_sequence_length must be greater than zero".into(),
            ));
        }
        if self.mode == EmbeddingMode::Stub && self.stub_dimensions == 0 {
            return Err(SemanticError::InvalidConfig(
                "stub_dimensions must be greater than zero".into(),
            ));
        }
        if self.intra_threads == 0 {
            return Err(SemanticError::InvalidConfig(
                "intra_threads must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

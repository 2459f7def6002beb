use std::path::PathBuf;

use crate::{EmbeddingMode, SemanticConfig, SemanticError};

#[derive(Debug)]
pub(crate) struct ModelAssets {
    pub(crate) model_path: PathBuf,
    pub(crate) tokenizer_path: PathBuf,
}

/// Checks that the model and tokenizer exist locally. Nothing is downloaded.
pub(crate) fn resolve_model_assets(cfg: &SemanticConfig) -> Result<ModelAssets, SemanticError> {
    if !cfg.model_path.is_file() {
        return Err(SemanticError::ModelNotFound(
            cfg.model_path.display().to_string(),
        ));
    }
    if !cfg.tokenizer_path.is_file() {
        return Err(SemanticError::TokenizerMissing(
            cfg.tokenizer_path.display().to_string(),
        ));
    }

    Ok(ModelAssets {
        model_path: cfg.model_path.clone(),
        tokenizer_path: cfg.tokenizer_path.clone(),
    })
}

/// Which matching strategy the environment can support.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    /// An embedding provider can be built.
    Semantic,
    /// Semantic matching is off for this process; `reason` says why.
    KeywordOnly { reason: String },
}

/// Startup capability check: stub mode always works, ONNX mode needs its assets on disk.
///
/// Run once when the process boots so request handling never has to probe the
/// environment itself.
pub fn detect_capability(cfg: &SemanticConfig) -> Capability {
    if let Err(err) = cfg.validate() {
        return Capability::KeywordOnly {
            reason: err.to_string(),
        };
    }
    match cfg.mode {
        EmbeddingMode::Stub => Capability::Semantic,
        EmbeddingMode::Onnx => match resolve_model_assets(cfg) {
            Ok(_) => Capability::Semantic,
            Err(err) => Capability::KeywordOnly {
                reason: err.to_string(),
            },
        },
    }
}

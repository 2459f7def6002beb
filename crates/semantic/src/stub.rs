use fxhash::hash64;

use crate::{EmbeddingProvider, EmbeddingVector, SemanticConfig, SemanticError};

/// Deterministic provider that needs no model files.
///
/// Each lowercase alphanumeric token is hashed into one of `dimensions` buckets; the
/// one-hot token vectors are mean-pooled and L2-normalized, mirroring what the ONNX
/// provider does with hidden states. Texts sharing words therefore score higher, which
/// is enough for tests and offline demos. A text with no tokens pools to zero and is
/// rejected like any other degenerate embedding.
#[derive(Debug, Clone)]
pub struct StubProvider {
    dimensions: usize,
    model_name: String,
}

impl StubProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            model_name: "stub-hashed-bow".into(),
        }
    }

    pub fn from_config(cfg: &SemanticConfig) -> Result<Self, SemanticError> {
        if cfg.stub_dimensions == 0 {
            return Err(SemanticError::InvalidConfig(
                "stub_dimensions must be greater than zero".into(),
            ));
        }
        Ok(Self::new(cfg.stub_dimensions))
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

impl EmbeddingProvider for StubProvider {
    fn embed(&self, text: &str) -> Result<EmbeddingVector, SemanticError> {
        if self.dimensions == 0 {
            return Err(SemanticError::EmbeddingFailed(
                "stub provider has zero dimensions".into(),
            ));
        }

        let mut pooled = vec![0f32; self.dimensions];
        let mut count = 0usize;
        for token in tokens(text) {
            let bucket = (hash64(token.as_bytes()) % self.dimensions as u64) as usize;
            pooled[bucket] += 1.0;
            count += 1;
        }
        if count > 0 {
            let inv = (count as f32).recip();
            for value in &mut pooled {
                *value *= inv;
            }
        }

        EmbeddingVector::try_normalized(pooled)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

use serde::{Deserialize, Serialize};

use crate::normalize::l2_normalize_in_place;
use crate::similarity::cosine_similarity;
use crate::SemanticError;

/// Fixed-length embedding produced by an [`EmbeddingProvider`](crate::EmbeddingProvider).
///
/// Vectors built through [`EmbeddingVector::try_normalized`] have unit Euclidean norm,
/// so cosine similarity between two of them is their dot product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    /// Wrap raw values without normalizing or validating them.
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    /// L2-normalize pooled model output, rejecting empty, non-finite or all-zero vectors.
    pub fn try_normalized(mut values: Vec<f32>) -> Result<Self, SemanticError> {
        if values.is_empty() {
            return Err(SemanticError::EmbeddingFailed(
                "model produced an empty vector".into(),
            ));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SemanticError::EmbeddingFailed(
                "model produced non-finite values".into(),
            ));
        }
        if values.iter().all(|&v| v == 0.0) {
            return Err(SemanticError::EmbeddingFailed(
                "model produced an all-zero vector".into(),
            ));
        }
        l2_normalize_in_place(&mut values);
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `true` when every component is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0.0)
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }

    /// Cosine similarity against `other`; see [`cosine_similarity`].
    pub fn cosine(&self, other: &EmbeddingVector) -> Result<f32, SemanticError> {
        cosine_similarity(&self.0, &other.0)
    }
}

impl From<Vec<f32>> for EmbeddingVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

impl AsRef<[f32]> for EmbeddingVector {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

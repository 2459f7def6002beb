//! Cosine similarity over raw `f32` slices.
//!
//! Usable on any pair of vectors, not only provider output: zero-norm inputs score `0`
//! instead of erroring, and accumulation runs in `f64` so the few hundred components of a
//! typical sentence embedding do not lose precision.

use crate::SemanticError;

/// Cosine similarity of `a` and `b`, in `[-1, 1]`.
///
/// Dot product and both squared norms are accumulated in one pass; each square root is
/// taken once. Fails with [`SemanticError::DimensionMismatch`] when the lengths differ and
/// returns exactly `0.0` when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, SemanticError> {
    if a.len() != b.len() {
        return Err(SemanticError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    let score = dot / (norm_a.sqrt() * norm_b.sqrt());
    Ok(score.clamp(-1.0, 1.0) as f32)
}

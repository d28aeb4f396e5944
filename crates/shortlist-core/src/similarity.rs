//! Cosine similarity between embedding vectors.

use thiserror::Error;

/// Keeps the denominator non-zero for degenerate (all-zero) vectors.
const DENOM_EPSILON: f32 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("embedding dimension mismatch: left {left}, right {right}")]
pub struct DimensionMismatchError {
    pub left: usize,
    pub right: usize,
}

/// Cosine similarity of two equal-length vectors, clamped to `[0.0, 1.0]`.
///
/// Mismatched lengths are an error rather than a silent zero; comparing
/// vectors from different embedding spaces is a caller bug. A zero vector
/// yields `0.0` through the epsilon in the denominator, and negative
/// similarities clamp to `0.0` so scores stay in a fixed range.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, DimensionMismatchError> {
    if a.len() != b.len() {
        return Err(DimensionMismatchError {
            left: a.len(),
            right: b.len(),
        });
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    Ok((dot / (norm_a * norm_b + DENOM_EPSILON)).clamp(0.0, 1.0))
}

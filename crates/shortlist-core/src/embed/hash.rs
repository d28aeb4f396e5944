//! Feature-hashing embedder.
//!
//! Tokens are hashed into a fixed number of buckets with a signed
//! contribution, then the vector is L2-normalized. No vocabulary, no model
//! weights, no I/O. Texts sharing many tokens land near each other, which
//! is enough signal for ranking smoke tests and offline pipelines.

use std::hash::{Hash, Hasher};

use siphasher::sip::SipHasher13;

use super::Embedder;

/// Fixed seeds keep embeddings stable across runs and Rust versions.
/// Changing either invalidates every stored vector; bump `version()` too.
const HASH_SEED_K0: u64 = 0x9e37_79b9_7f4a_7c15;
const HASH_SEED_K1: u64 = 0x2545_f491_4f6c_dd1d;

#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn hash_token(&self, token: &str) -> usize {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        token.hash(&mut hasher);
        (hasher.finish() % self.dimension as u64) as usize
    }

    /// Sign of a token's contribution; the marker suffix decorrelates the
    /// sign hash from the bucket hash.
    fn token_sign(&self, token: &str) -> f32 {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        format!("{token}#sign").hash(&mut hasher);
        if hasher.finish() % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

impl Embedder for HashEmbedder {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn version(&self) -> &str {
        "v1"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        for token in tokenize(text) {
            let bucket = self.hash_token(&token);
            vector[bucket] += self.token_sign(&token);
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }
}

//! Embedding provider seam.
//!
//! The engine only consumes vectors; where they come from is the caller's
//! choice behind [`Embedder`]. The built-in [`HashEmbedder`] is a cheap
//! deterministic provider good enough for smoke tests and offline runs.
//! Anything heavier (an ONNX session, a remote encoder service) plugs in
//! through the same trait.

pub mod hash;

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

pub use hash::HashEmbedder;

pub const DEFAULT_EMBEDDING_DIMENSION: usize = 384;

/// Turns text into a fixed-dimension vector.
///
/// Implementations must be deterministic: the same text always embeds to
/// the same vector. `name` and `version` identify the embedding space;
/// vectors from different (name, version) pairs are not comparable.
pub trait Embedder: std::fmt::Debug + Send + Sync {
    /// Stable identifier for the embedding family.
    fn name(&self) -> &'static str;

    /// Version of the embedding scheme; bumped when vectors change shape
    /// or meaning.
    fn version(&self) -> &str;

    /// Length of every vector this embedder produces.
    fn dimension(&self) -> usize;

    /// Embeds one text. The returned vector has exactly `dimension()`
    /// elements.
    fn embed(&self, text: &str) -> Vec<f32>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbedderError {
    #[error("unknown embedder kind: {0}")]
    UnknownKind(String),
    #[error("embedding dimension must be positive")]
    ZeroDimension,
}

/// Which embedder to construct and at what dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedderConfig {
    pub kind: String,
    pub dimension: usize,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            kind: "hash".to_string(),
            dimension: DEFAULT_EMBEDDING_DIMENSION,
        }
    }
}

/// Constructs the embedder named by the config.
///
/// An unrecognized kind is an error, not a fallback; scoring against
/// vectors from a different embedder than the caller asked for would be
/// silently wrong.
pub fn create_embedder(config: &EmbedderConfig) -> Result<Arc<dyn Embedder>, EmbedderError> {
    if config.dimension == 0 {
        return Err(EmbedderError::ZeroDimension);
    }

    match config.kind.as_str() {
        "hash" => {
            let embedder = HashEmbedder::new(config.dimension);
            info!(
                name = embedder.name(),
                version = embedder.version(),
                dimension = embedder.dimension(),
                "created embedder"
            );
            Ok(Arc::new(embedder))
        }
        other => Err(EmbedderError::UnknownKind(other.to_string())),
    }
}

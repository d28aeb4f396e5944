use std::path::PathBuf;

use thiserror::Error;

use shortlist_core::catalog::CatalogError;
use shortlist_core::embed::EmbedderError;
use shortlist_core::scoring::InvalidWeightsError;
use shortlist_core::similarity::DimensionMismatchError;

/// Everything the `shortlist` binary can fail with. File errors keep the
/// offending path so the operator can tell inputs apart.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("job has neither an embedding nor a description to embed")]
    MissingJobEmbedding,
    #[error("batch of {submitted} candidates exceeds the limit of {limit}")]
    BatchLimitExceeded { submitted: usize, limit: usize },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Weights(#[from] InvalidWeightsError),
    #[error(transparent)]
    Embedder(#[from] EmbedderError),
    #[error(transparent)]
    Dimension(#[from] DimensionMismatchError),
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

use std::path::PathBuf;

/// Errors produced while exporting the scan cache.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The input cache file does not exist.
    #[error("cache file {} not found", path.display())]
    CacheNotFound { path: PathBuf },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The cache (or one of its entries) is not valid JSON of the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// `block_number` is present but is not a non-negative number.
    #[error("invalid block_number {value}")]
    InvalidBlockNumber { value: String },

    /// A hardcoded reference date could not be built.
    #[error("invalid reference anchor for network {network}")]
    InvalidAnchor { network: String },

    /// Extrapolating from the anchor left chrono's representable range.
    #[error("estimated date for block {block_number} on {network} is out of range")]
    DateOutOfRange { network: String, block_number: u64 },
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}

//! Unified error types for respcache.
//!
//! Cache reads and evictions are total; only writes through the rewrite
//! pipeline and snapshot loading can fail.

/// Unified error types for the response cache.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A rewriter refused to process a write.
    ///
    /// The write that triggered it is aborted and nothing is stored under `key`.
    #[error("REWRITE_FAILED: {key}: {reason}")]
    Rewrite { key: String, reason: String },

    /// Invalid input (e.g., a snapshot that is not a JSON object).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// JSON (de)serialization failed.
    #[error("SERIALIZATION_ERROR: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Build a [`Error::Rewrite`] for the given key.
    pub fn rewrite(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Rewrite { key: key.into(), reason: reason.into() }
    }
}

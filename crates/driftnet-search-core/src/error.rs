//! Error types for search operations.

use std::error::Error;

use thiserror::Error;

/// Primary error type for search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Query was empty after trimming.
    #[error("invalid search query: {reason}")]
    InvalidQuery {
        /// Machine-readable reason for the rejection.
        reason: &'static str,
    },
    /// Source identifier is not present in the registry.
    #[error("unknown search source {source_id:?}")]
    UnknownSource {
        /// Identifier the caller asked for.
        source_id: String,
    },
    /// The underlying fetch failed (connect error, timeout, non-2xx status).
    #[error("search transport failed")]
    Transport {
        /// Source the request was addressed to.
        source_id: String,
        /// Underlying failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The background context reported a failure for this request.
    #[error("upstream search failed: {message}")]
    Upstream {
        /// Failure detail relayed over the wire.
        message: String,
    },
    /// The request was still pending when the channel shut down.
    #[error("search cancelled")]
    Cancelled,
}

impl SearchError {
    /// Wrap a transport-layer failure for the given source.
    pub fn transport(
        source_id: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            source_id: source_id.into(),
            source: Box::new(source),
        }
    }
}

/// Convenience alias for search operation results.
pub type SearchResult<T> = Result<T, SearchError>;

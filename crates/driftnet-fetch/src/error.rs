//! Error types for the fetch capability.

use thiserror::Error;

/// Primary error type for fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Client {
        /// Builder failure detail.
        #[source]
        source: reqwest::Error,
    },
    /// Request failed before a response arrived (connect error, timeout).
    #[error("request to {url} failed")]
    Request {
        /// Target URL.
        url: String,
        /// Underlying transport failure.
        #[source]
        source: reqwest::Error,
    },
    /// Upstream answered with a non-2xx status.
    #[error("request to {url} returned HTTP {status}")]
    Status {
        /// Target URL.
        url: String,
        /// Offending status code.
        status: u16,
    },
    /// Response body could not be read.
    #[error("failed to read response body from {url}")]
    Body {
        /// Target URL.
        url: String,
        /// Underlying read failure.
        #[source]
        source: reqwest::Error,
    },
}

/// Convenience alias for fetch results.
pub type FetchResult<T> = Result<T, FetchError>;

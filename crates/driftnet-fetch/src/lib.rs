#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Narrow fetch capability consumed by the search providers.
//!
//! Providers never talk to the network directly; they go through the
//! [`Fetcher`] trait so tests can inject scripted responses. The production
//! implementation is [`HttpFetcher`], a reqwest client with a fixed
//! per-request timeout.

mod error;
mod http;

pub use error::{FetchError, FetchResult};
pub use http::HttpFetcher;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

/// Raw response handed back to a provider.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// URL the request was issued against.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body, undecoded.
    pub body: String,
}

impl FetchResponse {
    /// Whether the status code is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Turn a non-2xx response into a [`FetchError::Status`].
    ///
    /// Callers must not silently accept non-success statuses; this mirrors
    /// `reqwest::Response::error_for_status`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Status`] when the status is outside 2xx.
    pub fn error_for_status(self) -> FetchResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status {
                url: self.url,
                status: self.status,
            })
        }
    }
}

/// Capability to issue a GET request against an upstream API.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the URL and return the raw response.
    ///
    /// The status code is returned as-is; interpreting non-2xx responses is
    /// the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the transport fails or the fixed timeout
    /// elapses.
    async fn get(&self, url: &str) -> FetchResult<FetchResponse>;
}

/// Decode a JSON body leniently, returning `default` when parsing fails.
///
/// Malformed JSON is swallowed at this boundary with a warn-level log entry;
/// callers that rely on structure must treat the default as a sentinel.
#[must_use]
pub fn json_or_default(body: &str, default: Value) -> Value {
    match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "failed to decode JSON body");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16) -> FetchResponse {
        FetchResponse {
            url: "https://example.test/api".to_string(),
            status,
            body: String::new(),
        }
    }

    #[test]
    fn error_for_status_accepts_2xx() {
        assert!(response(200).error_for_status().is_ok());
        assert!(response(204).error_for_status().is_ok());
    }

    #[test]
    fn error_for_status_rejects_everything_else() {
        for status in [199, 301, 404, 500] {
            match response(status).error_for_status() {
                Err(FetchError::Status { status: got, .. }) => assert_eq!(got, status),
                other => panic!("expected status error for {status}, got {other:?}"),
            }
        }
    }

    #[test]
    fn json_or_default_returns_parsed_value() {
        assert_eq!(
            json_or_default(r#"{"ok":true}"#, Value::Null),
            json!({"ok": true})
        );
    }

    #[test]
    fn json_or_default_swallows_malformed_bodies() {
        assert_eq!(json_or_default("not json {", Value::Null), Value::Null);
        assert_eq!(json_or_default("", json!([])), json!([]));
    }
}

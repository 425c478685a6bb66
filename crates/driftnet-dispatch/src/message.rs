//! Wire messages exchanged with the background search worker.

use driftnet_search_core::{SearchOptions, TorrentRelease};
use serde::{Deserialize, Serialize};

/// Request forwarded to the background context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Identifier correlating the eventual response to this request.
    pub correlation_id: u64,
    /// Registry key of the source to search.
    pub source_id: String,
    /// Raw query as the caller supplied it.
    pub query: String,
    /// Search configuration, passed through opaquely.
    pub options: SearchOptions,
}

/// Reply sent back from the background context.
///
/// `success` gates which of `data`/`error` is present; exactly one is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Identifier of the request this reply answers.
    pub correlation_id: u64,
    /// Whether the search succeeded.
    pub success: bool,
    /// Normalized results, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<TorrentRelease>>,
    /// Failure detail, present on error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    /// Successful reply carrying results.
    #[must_use]
    pub const fn ok(correlation_id: u64, data: Vec<TorrentRelease>) -> Self {
        Self {
            correlation_id,
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed reply carrying the rendered error.
    #[must_use]
    pub const fn err(correlation_id: u64, error: String) -> Self {
        Self {
            correlation_id,
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_reply_carries_data_and_no_error() {
        let wire = serde_json::to_value(SearchResponse::ok(7, Vec::new()))
            .expect("response should serialize");
        assert_eq!(wire.get("correlationId"), Some(&json!(7)));
        assert_eq!(wire.get("success"), Some(&json!(true)));
        assert_eq!(wire.get("data"), Some(&json!([])));
        assert!(wire.get("error").is_none());
    }

    #[test]
    fn failure_reply_carries_error_and_no_data() {
        let wire = serde_json::to_value(SearchResponse::err(8, "boom".to_string()))
            .expect("response should serialize");
        assert_eq!(wire.get("success"), Some(&json!(false)));
        assert_eq!(wire.get("error"), Some(&json!("boom")));
        assert!(wire.get("data").is_none());
    }

    #[test]
    fn request_round_trips_with_camel_case_keys() {
        let request: SearchRequest = serde_json::from_value(json!({
            "correlationId": 3,
            "sourceId": "nyaasi",
            "query": "ghost",
            "options": {"limit": 5, "fuzzy": true}
        }))
        .expect("request should deserialize");

        assert_eq!(request.correlation_id, 3);
        assert_eq!(request.source_id, "nyaasi");
        assert_eq!(request.options.limit, Some(5));
        assert_eq!(request.options.extra.get("fuzzy"), Some(&json!(true)));
    }
}

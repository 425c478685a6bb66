//! AnimeTosho provider, backed by its JSON torrent search API.

use std::sync::Arc;

use async_trait::async_trait;
use driftnet_fetch::{FetchResponse, Fetcher, json_or_default};
use driftnet_search_core::{
    SearchError, SearchOptions, SearchProvider, SearchResult, TorrentRelease, validate_query,
};
use serde_json::Value;
use tracing::{info, warn};
use url::form_urlencoded;

use crate::map::{first_count, first_string};

const SOURCE_ID: &str = "animetosho";
const BASE_URL: &str = "https://animetosho.org/api/v2/search/torrent";
const DEFAULT_SORT: &str = "update_date";

/// Provider for the AnimeTosho torrent search API.
///
/// Returns a bare top-level JSON array of torrent objects.
pub struct AnimeTosho {
    base_url: String,
    fetcher: Arc<dyn Fetcher>,
}

impl AnimeTosho {
    /// Construct a provider against the production endpoint.
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            fetcher,
        }
    }

    fn request_url(&self, query: &str, options: &SearchOptions) -> String {
        let mut params = form_urlencoded::Serializer::new(String::new());
        params.append_pair("q", query);
        params.append_pair("limit", &options.limit_or_default().to_string());
        params.append_pair("offset", &options.offset_or_default().to_string());
        params.append_pair("sort", options.sort_or(DEFAULT_SORT));
        params.append_pair("order", options.order.as_param());
        format!("{}?{}", self.base_url, params.finish())
    }
}

#[async_trait]
impl SearchProvider for AnimeTosho {
    fn source_id(&self) -> &'static str {
        SOURCE_ID
    }

    fn display_name(&self) -> &'static str {
        "AnimeTosho"
    }

    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> SearchResult<Vec<TorrentRelease>> {
        let query = validate_query(query)?;
        let url = self.request_url(query, options);
        info!(source = SOURCE_ID, query, "searching");

        let response = self
            .fetcher
            .get(&url)
            .await
            .and_then(FetchResponse::error_for_status)
            .map_err(|err| SearchError::transport(SOURCE_ID, err))?;

        let payload = json_or_default(&response.body, Value::Null);
        let Some(items) = payload.as_array() else {
            warn!(source = SOURCE_ID, "unexpected payload shape from upstream");
            return Ok(Vec::new());
        };

        Ok(items.iter().filter_map(map_release).collect())
    }
}

fn map_release(item: &Value) -> Option<TorrentRelease> {
    let title = first_string(item, &["title"])?;
    Some(TorrentRelease {
        title,
        link: first_string(item, &["link"]),
        torrent_url: first_string(item, &["torrent_url"]),
        magnet_uri: first_string(item, &["magnet_uri"]),
        seeders: first_count(item, &["seeders"]),
        leechers: first_count(item, &["leechers"]),
        size_bytes: first_count(item, &["total_size"]),
        published_at: first_string(item, &["release_date", "update_date"]),
        source_id: SOURCE_ID.to_string(),
        ..TorrentRelease::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftnet_test_support::fixtures;
    use driftnet_test_support::mocks::ScriptedFetcher;

    fn provider(fetcher: ScriptedFetcher) -> (AnimeTosho, Arc<ScriptedFetcher>) {
        let fetcher = Arc::new(fetcher);
        let provider = AnimeTosho::new(fetcher.clone() as Arc<dyn Fetcher>);
        (provider, fetcher)
    }

    #[tokio::test]
    async fn normalizes_payload_and_drops_untitled_items() {
        let (provider, _) =
            provider(ScriptedFetcher::new().respond("animetosho.org", 200, fixtures::ANIMETOSHO_OK));

        let releases = provider
            .search("show a", &SearchOptions::default())
            .await
            .expect("search should succeed");

        assert_eq!(releases.len(), 2);
        let first = &releases[0];
        assert_eq!(first.title, "Show A S01E01 1080p");
        assert_eq!(first.seeders, 120);
        assert_eq!(first.size_bytes, 1_500_000_000);
        assert_eq!(first.published_at.as_deref(), Some("2024-03-01 10:00"));
        assert_eq!(first.source_id, "animetosho");

        // Second surviving item has no release_date; update_date wins the chain.
        assert_eq!(releases[1].published_at.as_deref(), Some("2024-03-08 10:00"));
        assert_eq!(releases[1].seeders, 0);
    }

    #[tokio::test]
    async fn maps_options_to_upstream_parameters() {
        let (provider, fetcher) =
            provider(ScriptedFetcher::new().respond("animetosho.org", 200, "[]"));

        let options = SearchOptions {
            limit: Some(5),
            offset: Some(10),
            sort: Some("seeders".to_string()),
            order: driftnet_search_core::SortOrder::Asc,
            ..SearchOptions::default()
        };
        provider
            .search("  ghost  ", &options)
            .await
            .expect("search should succeed");

        let urls = fetcher.requested_urls();
        assert_eq!(urls.len(), 1);
        let url = &urls[0];
        assert!(url.contains("q=ghost"), "query should be trimmed: {url}");
        assert!(url.contains("limit=5"));
        assert!(url.contains("offset=10"));
        assert!(url.contains("sort=seeders"));
        assert!(url.contains("order=asc"));
    }

    #[tokio::test]
    async fn applies_source_defaults_when_options_are_empty() {
        let (provider, fetcher) =
            provider(ScriptedFetcher::new().respond("animetosho.org", 200, "[]"));

        provider
            .search("ghost", &SearchOptions::default())
            .await
            .expect("search should succeed");

        let url = &fetcher.requested_urls()[0];
        assert!(url.contains("limit=50"));
        assert!(url.contains("offset=0"));
        assert!(url.contains("sort=update_date"));
        assert!(url.contains("order=desc"));
    }

    #[tokio::test]
    async fn unexpected_shape_degrades_to_empty() {
        let (provider, _) = provider(
            ScriptedFetcher::new().respond("animetosho.org", 200, fixtures::ANIMETOSHO_BAD_SHAPE),
        );

        let releases = provider
            .search("ghost", &SearchOptions::default())
            .await
            .expect("unexpected shape must not error");
        assert!(releases.is_empty());
    }

    #[tokio::test]
    async fn non_json_body_degrades_to_empty() {
        let (provider, _) =
            provider(ScriptedFetcher::new().respond("animetosho.org", 200, fixtures::NOT_JSON));

        let releases = provider
            .search("ghost", &SearchOptions::default())
            .await
            .expect("non-JSON body must not error");
        assert!(releases.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_a_transport_error() {
        let (provider, _) = provider(ScriptedFetcher::new().respond("animetosho.org", 503, ""));

        let err = provider
            .search("ghost", &SearchOptions::default())
            .await
            .expect_err("non-2xx must fail");
        assert!(matches!(err, SearchError::Transport { .. }));
    }

    #[tokio::test]
    async fn empty_query_fails_before_any_network_call() {
        let (provider, fetcher) = provider(ScriptedFetcher::new());

        let err = provider
            .search("   ", &SearchOptions::default())
            .await
            .expect_err("blank query must fail");
        assert!(matches!(err, SearchError::InvalidQuery { .. }));
        assert_eq!(fetcher.call_count(), 0);
    }
}

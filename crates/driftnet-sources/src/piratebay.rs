//! The Pirate Bay provider, backed by the public apibay endpoint.

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

const SOURCE_ID: &str = "piratebay";
const BASE_URL: &str = "https://apibay.org";
const DESCRIPTION_URL: &str = "https://thepiratebay.org/description.php?id=";
const TORRENT_URL: &str = "https://thepiratebay.org/torrent/";
const MAGNET_TRACKER: &str = "udp://tracker.openbittorrent.com:80/announce";

/// Provider for The Pirate Bay via apibay.
///
/// The `q.php` endpoint has no paging parameters, so the requested limit is
/// enforced client-side by truncation. Counts arrive as strings and entries
/// without an id are placeholders to be dropped.
pub struct PirateBay {
    base_url: String,
    fetcher: Arc<dyn Fetcher>,
}

impl PirateBay {
    /// Construct a provider against the production endpoint.
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            fetcher,
        }
    }

    fn request_url(&self, query: &str) -> String {
        let mut params = form_urlencoded::Serializer::new(String::new());
        params.append_pair("q", query);
        params.append_pair("cat", "0");
        format!("{}/q.php?{}", self.base_url, params.finish())
    }
}

#[async_trait]
impl SearchProvider for PirateBay {
    fn source_id(&self) -> &'static str {
        SOURCE_ID
    }

    fn display_name(&self) -> &'static str {
        "PirateBay"
    }

    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> SearchResult<Vec<TorrentRelease>> {
        let query = validate_query(query)?;
        let url = self.request_url(query);
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

        let limit = usize::try_from(options.limit_or_default()).unwrap_or(usize::MAX);
        Ok(items.iter().filter_map(map_release).take(limit).collect())
    }
}

fn map_release(item: &Value) -> Option<TorrentRelease> {
    let id = first_string(item, &["id"])?;
    let title = first_string(item, &["name"])?;
    Some(TorrentRelease {
        link: Some(format!("{DESCRIPTION_URL}{id}")),
        torrent_url: Some(format!("{TORRENT_URL}{id}")),
        magnet_uri: first_string(item, &["info_hash"]).map(|hash| magnet_for(&hash)),
        id: Some(id),
        title,
        seeders: first_count(item, &["seeders"]),
        leechers: first_count(item, &["leechers"]),
        size_bytes: first_count(item, &["size"]),
        published_at: first_string(item, &["pubdate"]),
        source_id: SOURCE_ID.to_string(),
        category: first_string(item, &["category"]),
        ..TorrentRelease::default()
    })
}

fn magnet_for(info_hash: &str) -> String {
    format!("magnet:?xt=urn:btih:{info_hash}&dn=&tr={MAGNET_TRACKER}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftnet_test_support::fixtures;
    use driftnet_test_support::mocks::ScriptedFetcher;

    #[tokio::test]
    async fn normalizes_stringly_counts_and_drops_idless_entries() {
        let fetcher =
            Arc::new(ScriptedFetcher::new().respond("apibay.org", 200, fixtures::PIRATEBAY_OK));
        let provider = PirateBay::new(fetcher.clone() as Arc<dyn Fetcher>);

        let releases = provider
            .search("some movie", &SearchOptions::default())
            .await
            .expect("search should succeed");

        assert_eq!(releases.len(), 2);
        let first = &releases[0];
        assert_eq!(first.id.as_deref(), Some("7001"));
        assert_eq!(first.seeders, 87);
        assert_eq!(first.leechers, 12);
        assert_eq!(
            first.link.as_deref(),
            Some("https://thepiratebay.org/description.php?id=7001")
        );
        assert_eq!(
            first.torrent_url.as_deref(),
            Some("https://thepiratebay.org/torrent/7001")
        );
        let magnet = first.magnet_uri.as_deref().expect("magnet synthesized");
        assert!(magnet.starts_with("magnet:?xt=urn:btih:C0FFEE00"));
        assert!(magnet.ends_with(MAGNET_TRACKER));
        assert_eq!(first.source_id, "piratebay");
    }

    #[tokio::test]
    async fn limit_is_enforced_client_side() {
        let fetcher =
            Arc::new(ScriptedFetcher::new().respond("apibay.org", 200, fixtures::PIRATEBAY_OK));
        let provider = PirateBay::new(fetcher.clone() as Arc<dyn Fetcher>);

        let options = SearchOptions {
            limit: Some(1),
            ..SearchOptions::default()
        };
        let releases = provider
            .search("some movie", &options)
            .await
            .expect("search should succeed");

        assert_eq!(releases.len(), 1);
        // No paging parameters go upstream; truncation happens here.
        let url = &fetcher.requested_urls()[0];
        assert!(!url.contains("limit="), "apibay has no limit parameter: {url}");
        assert!(url.contains("q.php?q=some+movie"));
        assert!(url.contains("cat=0"));
    }

    #[tokio::test]
    async fn unexpected_shape_degrades_to_empty() {
        let fetcher = Arc::new(
            ScriptedFetcher::new().respond("apibay.org", 200, fixtures::PIRATEBAY_BAD_SHAPE),
        );
        let provider = PirateBay::new(fetcher.clone() as Arc<dyn Fetcher>);

        let releases = provider
            .search("ghost", &SearchOptions::default())
            .await
            .expect("unexpected shape must not error");
        assert!(releases.is_empty());
    }
}

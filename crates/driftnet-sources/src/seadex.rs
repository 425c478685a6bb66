//! SeaDex provider (releases.moe).

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

const SOURCE_ID: &str = "seadex";
const BASE_URL: &str = "https://releases.moe/api/v1/torrents";

/// Provider for the SeaDex curated-release API.
///
/// Results arrive under a `torrents` key; the API has no sort parameter.
pub struct SeaDex {
    base_url: String,
    fetcher: Arc<dyn Fetcher>,
}

impl SeaDex {
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
        format!("{}?{}", self.base_url, params.finish())
    }
}

#[async_trait]
impl SearchProvider for SeaDex {
    fn source_id(&self) -> &'static str {
        SOURCE_ID
    }

    fn display_name(&self) -> &'static str {
        "SeaDex"
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
        let Some(items) = payload.get("torrents").and_then(Value::as_array) else {
            warn!(source = SOURCE_ID, "unexpected payload shape from upstream");
            return Ok(Vec::new());
        };

        Ok(items.iter().filter_map(map_release).collect())
    }
}

fn map_release(item: &Value) -> Option<TorrentRelease> {
    let title = first_string(item, &["title", "name"])?;
    Some(TorrentRelease {
        id: first_string(item, &["id"]),
        title,
        link: first_string(item, &["link"]),
        torrent_url: first_string(item, &["torrent_url", "torrent"]),
        magnet_uri: first_string(item, &["magnet_uri", "magnet"]),
        seeders: first_count(item, &["seeders", "seeds"]),
        leechers: first_count(item, &["leechers", "peers"]),
        size_bytes: first_count(item, &["size", "total_size"]),
        published_at: first_string(item, &["pub_date", "created_at"]),
        source_id: SOURCE_ID.to_string(),
        quality: first_string(item, &["quality", "resolution"]),
        encoder: first_string(item, &["encoder", "uploader"]),
        ..TorrentRelease::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftnet_test_support::fixtures;
    use driftnet_test_support::mocks::ScriptedFetcher;

    #[tokio::test]
    async fn normalizes_alternate_count_and_label_keys() {
        let fetcher =
            Arc::new(ScriptedFetcher::new().respond("releases.moe", 200, fixtures::SEADEX_OK));
        let provider = SeaDex::new(fetcher.clone() as Arc<dyn Fetcher>);

        let releases = provider
            .search("show c", &SearchOptions::default())
            .await
            .expect("search should succeed");

        assert_eq!(releases.len(), 1);
        let release = &releases[0];
        assert_eq!(release.title, "Show C (BD 1080p)");
        assert_eq!(release.seeders, 54, "seeds fallback");
        assert_eq!(release.leechers, 6, "peers fallback");
        assert_eq!(release.size_bytes, 34_359_738_368, "total_size fallback");
        assert_eq!(release.quality.as_deref(), Some("1080p"), "resolution fallback");
        assert_eq!(release.encoder.as_deref(), Some("GroupC"), "uploader fallback");
        assert_eq!(release.published_at.as_deref(), Some("2023-11-20"));
        assert_eq!(release.source_id, "seadex");
    }

    #[tokio::test]
    async fn request_carries_paging_but_no_sort() {
        let fetcher =
            Arc::new(ScriptedFetcher::new().respond("releases.moe", 200, r#"{"torrents":[]}"#));
        let provider = SeaDex::new(fetcher.clone() as Arc<dyn Fetcher>);

        let options = SearchOptions {
            limit: Some(20),
            offset: Some(40),
            sort: Some("ignored".to_string()),
            ..SearchOptions::default()
        };
        provider
            .search("ghost", &options)
            .await
            .expect("search should succeed");

        let url = &fetcher.requested_urls()[0];
        assert!(url.contains("limit=20"));
        assert!(url.contains("offset=40"));
        assert!(!url.contains("sort"), "seadex has no sort parameter: {url}");
    }

    #[tokio::test]
    async fn torrents_key_with_wrong_type_degrades_to_empty() {
        let fetcher =
            Arc::new(ScriptedFetcher::new().respond("releases.moe", 200, fixtures::SEADEX_BAD_SHAPE));
        let provider = SeaDex::new(fetcher.clone() as Arc<dyn Fetcher>);

        let releases = provider
            .search("ghost", &SearchOptions::default())
            .await
            .expect("unexpected shape must not error");
        assert!(releases.is_empty());
    }
}

//! Nyaa.si provider.

use std::sync::Arc;

use async_trait::async_trait;
use driftnet_fetch::{FetchResponse, Fetcher, json_or_default};
use driftnet_search_core::{
    SearchError, SearchOptions, SearchProvider, SearchResult, TorrentRelease, validate_query,
};
use serde_json::Value;
use tracing::{info, warn};
use url::form_urlencoded;

use crate::map::{first_count, first_string, opt_count};

const SOURCE_ID: &str = "nyaasi";
const BASE_URL: &str = "https://nyaa.si/api/v1/search";
const VIEW_URL: &str = "https://nyaa.si/view";
const DEFAULT_SORT: &str = "downloads";

/// Provider for the Nyaa.si search API.
///
/// Results arrive nested under a `results` key; details-page links are
/// synthesized from the item id.
pub struct NyaaSi {
    base_url: String,
    fetcher: Arc<dyn Fetcher>,
}

impl NyaaSi {
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
        params.append_pair("sort_by", options.sort_or(DEFAULT_SORT));
        params.append_pair("order", options.order.as_param());
        format!("{}?{}", self.base_url, params.finish())
    }
}

#[async_trait]
impl SearchProvider for NyaaSi {
    fn source_id(&self) -> &'static str {
        SOURCE_ID
    }

    fn display_name(&self) -> &'static str {
        "NyaaSi"
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
        let Some(items) = payload.get("results").and_then(Value::as_array) else {
            warn!(source = SOURCE_ID, "unexpected payload shape from upstream");
            return Ok(Vec::new());
        };

        Ok(items.iter().filter_map(map_release).collect())
    }
}

fn map_release(item: &Value) -> Option<TorrentRelease> {
    let title = first_string(item, &["name", "title"])?;
    let id = first_string(item, &["id"]);
    let link = id.as_deref().map(|id| format!("{VIEW_URL}/{id}"));
    Some(TorrentRelease {
        id,
        title,
        link,
        torrent_url: first_string(item, &["torrent_url"]),
        magnet_uri: first_string(item, &["magnet_uri", "magnet"]),
        seeders: first_count(item, &["seeders"]),
        leechers: first_count(item, &["leechers"]),
        size_bytes: first_count(item, &["filesize", "size"]),
        published_at: first_string(item, &["publish_date", "created_time"]),
        source_id: SOURCE_ID.to_string(),
        category: first_string(item, &["category"]),
        submitter: first_string(item, &["submitter"]),
        downloads: opt_count(item, &["downloads"]),
        ..TorrentRelease::default()
    })
}

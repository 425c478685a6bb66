//! Normalized search DTOs shared across providers and transports.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Normalized torrent search hit.
///
/// Every provider maps its upstream payload into this shape. Records always
/// carry a non-empty `title` and `source`; numeric fields default to zero
/// when the upstream omits them and are never negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TorrentRelease {
    /// Upstream item identifier, when the source exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Release title. Items whose resolved title is empty are dropped.
    pub title: String,
    /// Details page URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Direct `.torrent` download URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torrent_url: Option<String>,
    /// Magnet URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnet_uri: Option<String>,
    /// Seeder count.
    #[serde(default)]
    pub seeders: u64,
    /// Leecher count.
    #[serde(default)]
    pub leechers: u64,
    /// Payload size in bytes.
    #[serde(default)]
    pub size_bytes: u64,
    /// Publication timestamp in the source's native format, never parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    /// Identifier of the source that produced this record.
    pub source_id: String,
    /// Upstream category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Release quality or resolution label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    /// Account that submitted the release.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter: Option<String>,
    /// Encoder or release group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoder: Option<String>,
    /// Completed download count, where the source tracks it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u64>,
}

/// Result ordering requested from the upstream API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

impl SortOrder {
    /// Wire value used in upstream query strings.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Search configuration bag.
///
/// Providers interpret only the fields they understand; anything else is
/// preserved opaquely in `extra` and travels across the background channel
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Maximum number of results to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Result offset for pagination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Sort key, in the source's own vocabulary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Sort direction.
    #[serde(default)]
    pub order: SortOrder,
    /// Unrecognized fields, passed through opaquely.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchOptions {
    /// Limit applied when the caller does not provide one.
    pub const DEFAULT_LIMIT: u32 = 50;

    /// Effective result limit.
    #[must_use]
    pub fn limit_or_default(&self) -> u32 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }

    /// Effective result offset.
    #[must_use]
    pub fn offset_or_default(&self) -> u32 {
        self.offset.unwrap_or(0)
    }

    /// Effective sort key, falling back to the source's default.
    #[must_use]
    pub fn sort_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.sort.as_deref().unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn release_numeric_fields_default_to_zero() {
        let release: TorrentRelease = serde_json::from_value(json!({
            "title": "Some Show S01",
            "sourceId": "nyaasi"
        }))
        .expect("minimal record should deserialize");

        assert_eq!(release.seeders, 0);
        assert_eq!(release.leechers, 0);
        assert_eq!(release.size_bytes, 0);
        assert!(release.id.is_none());
        assert!(release.downloads.is_none());
    }

    #[test]
    fn release_serializes_with_wire_field_names() {
        let release = TorrentRelease {
            title: "Some Show S01".to_string(),
            source_id: "nyaasi".to_string(),
            size_bytes: 7,
            magnet_uri: Some("magnet:?xt=urn:btih:abc".to_string()),
            ..TorrentRelease::default()
        };

        let wire = serde_json::to_value(&release).expect("record should serialize");
        assert_eq!(wire.get("sourceId"), Some(&json!("nyaasi")));
        assert_eq!(wire.get("sizeBytes"), Some(&json!(7)));
        assert_eq!(wire.get("magnetUri"), Some(&json!("magnet:?xt=urn:btih:abc")));
        assert!(wire.get("torrentUrl").is_none(), "absent optionals are omitted");
    }

    #[test]
    fn options_defaults() {
        let options = SearchOptions::default();
        assert_eq!(options.limit_or_default(), 50);
        assert_eq!(options.offset_or_default(), 0);
        assert_eq!(options.order, SortOrder::Desc);
        assert_eq!(options.sort_or("update_date"), "update_date");
    }

    #[test]
    fn options_preserve_unrecognized_fields() {
        let options: SearchOptions = serde_json::from_value(json!({
            "limit": 10,
            "fuzzy": true,
            "region": "eu"
        }))
        .expect("options with extra fields should deserialize");

        assert_eq!(options.limit, Some(10));
        assert_eq!(options.extra.get("fuzzy"), Some(&json!(true)));

        let round = serde_json::to_value(&options).expect("options should serialize");
        assert_eq!(round.get("region"), Some(&json!("eu")));
    }

    #[test]
    fn sort_order_wire_values() {
        assert_eq!(SortOrder::Asc.as_param(), "asc");
        assert_eq!(SortOrder::Desc.as_param(), "desc");
        let order: SortOrder =
            serde_json::from_value(json!("asc")).expect("lowercase wire value should parse");
        assert_eq!(order, SortOrder::Asc);
    }
}

//! Canned upstream payloads, one set per source.
//!
//! The well-formed fixtures mirror the shapes the real APIs return; the
//! malformed ones exercise the degrade-to-empty policy.

/// AnimeTosho search payload: a bare top-level array.
pub const ANIMETOSHO_OK: &str = r#"[
  {
    "title": "Show A S01E01 1080p",
    "link": "https://animetosho.org/view/1",
    "torrent_url": "https://animetosho.org/storage/torrent/1.torrent",
    "magnet_uri": "magnet:?xt=urn:btih:aaa",
    "seeders": 120,
    "leechers": 4,
    "total_size": 1500000000,
    "release_date": "2024-03-01 10:00"
  },
  {
    "title": "",
    "seeders": 9
  },
  {
    "title": "Show A S01E02 1080p",
    "update_date": "2024-03-08 10:00",
    "total_size": 1400000000
  }
]"#;

/// AnimeTosho payload with an unexpected top-level shape.
pub const ANIMETOSHO_BAD_SHAPE: &str = r#"{"error": "maintenance"}"#;

/// Nyaa.si search payload: results nested under a key.
pub const NYAA_OK: &str = r#"{
  "results": [
    {
      "id": 101,
      "name": "Show B 05 [720p]",
      "torrent_url": "https://nyaa.si/download/101.torrent",
      "magnet": "magnet:?xt=urn:btih:bbb",
      "seeders": 33,
      "leechers": 2,
      "downloads": 410,
      "filesize": 734003200,
      "publish_date": "2024-02-11T08:30:00Z",
      "category": "Anime - English-translated",
      "submitter": "subber"
    },
    {
      "id": 102,
      "title": "Show B 06 [720p]",
      "size": 734003200,
      "created_time": "2024-02-18T08:30:00Z"
    }
  ]
}"#;

/// Nyaa.si payload whose `results` is not an array.
pub const NYAA_BAD_SHAPE: &str = r#"{"results": "not-an-array"}"#;

/// PirateBay (apibay) payload: a bare array with stringly-typed numbers.
pub const PIRATEBAY_OK: &str = r#"[
  {
    "id": "7001",
    "name": "Some Movie 2023 1080p",
    "info_hash": "C0FFEE00C0FFEE00C0FFEE00C0FFEE00C0FFEE00",
    "seeders": "87",
    "leechers": "12",
    "size": 2147483648,
    "pubdate": "1677651200",
    "category": "207"
  },
  {
    "name": "entry without id is dropped"
  },
  {
    "id": "7002",
    "name": "Some Movie 2023 720p",
    "info_hash": "DEADBEEF00DEADBEEF00DEADBEEF00DEADBEEF00",
    "seeders": "3",
    "leechers": "1",
    "size": 1073741824,
    "pubdate": "1677651300",
    "category": "207"
  }
]"#;

/// PirateBay payload with an unexpected top-level shape.
pub const PIRATEBAY_BAD_SHAPE: &str = r#"{"status": "blocked"}"#;

/// SeaDex search payload: torrents nested under a key.
pub const SEADEX_OK: &str = r#"{
  "torrents": [
    {
      "id": "sd-1",
      "title": "Show C (BD 1080p)",
      "link": "https://releases.moe/show-c",
      "torrent": "https://releases.moe/dl/sd-1.torrent",
      "magnet_uri": "magnet:?xt=urn:btih:ccc",
      "seeds": 54,
      "peers": 6,
      "total_size": 34359738368,
      "created_at": "2023-11-20",
      "resolution": "1080p",
      "uploader": "GroupC"
    }
  ]
}"#;

/// SeaDex payload whose `torrents` is not an array.
pub const SEADEX_BAD_SHAPE: &str = r#"{"torrents": 7}"#;

/// Body that is not JSON at all.
pub const NOT_JSON: &str = "<html>upstream had a bad day</html>";

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

//! Built-in search providers, one per upstream indexer API.
//!
//! Each provider owns the knowledge of its upstream's request parameters and
//! response shape: parameter names, default sort keys, and the
//! field-fallback chains that normalize loosely-shaped payloads into
//! [`driftnet_search_core::TorrentRelease`] records. Nothing outside this
//! crate knows anything source-specific.

mod animetosho;
mod map;
mod nyaasi;
mod piratebay;
mod registry;
mod seadex;

pub use animetosho::AnimeTosho;
pub use nyaasi::NyaaSi;
pub use piratebay::PirateBay;
pub use registry::builtin_registry;
pub use seadex::SeaDex;

//! Source-agnostic search interfaces and DTOs.
//!
//! Everything the dispatcher and the per-source providers agree on lives
//! here: the normalized [`TorrentRelease`] record, the [`SearchOptions`]
//! bag, the [`SearchProvider`] capability trait, and the immutable
//! [`ProviderRegistry`] that maps source identifiers to provider instances.

mod error;
mod model;
mod provider;
mod registry;

pub use error::{SearchError, SearchResult};
pub use model::{SearchOptions, SortOrder, TorrentRelease};
pub use provider::{SearchProvider, validate_query};
pub use registry::ProviderRegistry;

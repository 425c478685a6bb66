//! Provider capability trait and query validation.

use async_trait::async_trait;

use crate::error::{SearchError, SearchResult};
use crate::model::{SearchOptions, TorrentRelease};

/// Capability trait implemented once per upstream indexer.
///
/// Implementations are stateless apart from their fixed endpoint and the
/// injected fetch capability, so a single instance can serve concurrent
/// searches without synchronisation.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Stable identifier used as the registry key (e.g. `"nyaasi"`).
    fn source_id(&self) -> &'static str;

    /// Human-readable name used in logs.
    fn display_name(&self) -> &'static str;

    /// Execute a search against the upstream API and normalize the payload.
    ///
    /// The returned sequence is finite and not restartable; a fresh call
    /// re-issues the upstream request.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidQuery`] before any I/O when the query is
    /// empty after trimming, and [`SearchError::Transport`] when the upstream
    /// request fails. An upstream payload whose top-level shape is unexpected
    /// is not an error: it degrades to an empty sequence.
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> SearchResult<Vec<TorrentRelease>>;
}

/// Trim a query and reject it when nothing remains.
///
/// # Errors
///
/// Returns [`SearchError::InvalidQuery`] for empty or whitespace-only input.
pub fn validate_query(query: &str) -> SearchResult<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(SearchError::InvalidQuery {
            reason: "query must be a non-empty string",
        });
    }
    Ok(trimmed)
}

//! Public dispatch surface.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use driftnet_search_core::{
    ProviderRegistry, SearchError, SearchOptions, SearchResult, TorrentRelease, validate_query,
};
use futures_util::future::join_all;
use tracing::warn;

use crate::message::SearchRequest;
use crate::transport::{BackgroundChannel, InProcessChannel};

enum ActiveChannel {
    InProcess(InProcessChannel),
    Background(BackgroundChannel),
}

/// Routes searches to providers over the active transport channel.
///
/// Correlation ids come from an atomic counter and are never reused, so a
/// stale or duplicate response can never complete a newer request. Every
/// call is dispatched immediately; there is no queue-depth limit.
pub struct Dispatcher {
    registry: Arc<ProviderRegistry>,
    channel: ActiveChannel,
    next_correlation_id: AtomicU64,
}

impl Dispatcher {
    /// Construct a dispatcher, preferring the background channel.
    ///
    /// The factory runs once for the dispatcher's own registry and once for
    /// the background worker's, which owns its instance outright. When no
    /// runtime is available to host the worker, the dispatcher falls back to
    /// in-process dispatch for its whole lifetime and never retries.
    pub fn new<F>(registry_factory: F) -> Self
    where
        F: Fn() -> ProviderRegistry,
    {
        let registry = Arc::new(registry_factory());
        let channel = match BackgroundChannel::spawn(registry_factory()) {
            Ok(channel) => ActiveChannel::Background(channel),
            Err(err) => {
                warn!(
                    error = %err,
                    "background search context unavailable, dispatching in-process"
                );
                ActiveChannel::InProcess(InProcessChannel::new(Arc::clone(&registry)))
            }
        };
        Self {
            registry,
            channel,
            next_correlation_id: AtomicU64::new(1),
        }
    }

    /// Construct a dispatcher that always dispatches in-process.
    #[must_use]
    pub fn in_process(registry: ProviderRegistry) -> Self {
        let registry = Arc::new(registry);
        Self {
            channel: ActiveChannel::InProcess(InProcessChannel::new(Arc::clone(&registry))),
            registry,
            next_correlation_id: AtomicU64::new(1),
        }
    }

    /// Search one source.
    ///
    /// Concurrent calls are fully independent and may complete in any
    /// order; completion is matched by correlation id, never by send order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidQuery`] or
    /// [`SearchError::UnknownSource`] immediately, with no dispatch or
    /// network activity; [`SearchError::Transport`] and
    /// [`SearchError::Upstream`] when the provider fails; and
    /// [`SearchError::Cancelled`] when the channel shuts down while the
    /// request is pending.
    pub async fn search(
        &self,
        source_id: &str,
        query: &str,
        options: SearchOptions,
    ) -> SearchResult<Vec<TorrentRelease>> {
        validate_query(query)?;
        if !self.registry.contains(source_id) {
            return Err(SearchError::UnknownSource {
                source_id: source_id.to_string(),
            });
        }

        let correlation_id = self.next_correlation_id.fetch_add(1, Ordering::Relaxed);
        let request = SearchRequest {
            correlation_id,
            source_id: source_id.to_string(),
            query: query.to_string(),
            options,
        };
        match &self.channel {
            ActiveChannel::InProcess(channel) => channel.send(request).await,
            ActiveChannel::Background(channel) => channel.send(request).await,
        }
    }

    /// Search several sources concurrently, collecting per-source outcomes.
    ///
    /// Each source succeeds or fails on its own; one failure never cancels
    /// the sibling searches.
    pub async fn search_many(
        &self,
        source_ids: &[&str],
        query: &str,
        options: &SearchOptions,
    ) -> Vec<(String, SearchResult<Vec<TorrentRelease>>)> {
        let searches = source_ids.iter().map(|source_id| async move {
            let outcome = self.search(source_id, query, options.clone()).await;
            ((*source_id).to_string(), outcome)
        });
        join_all(searches).await
    }

    /// Registered source identifiers, sorted.
    #[must_use]
    pub fn source_ids(&self) -> Vec<&str> {
        self.registry.source_ids()
    }

    /// Whether searches go through the background worker.
    #[must_use]
    pub const fn uses_background_channel(&self) -> bool {
        matches!(self.channel, ActiveChannel::Background(_))
    }

    /// Tear down the background context.
    ///
    /// Every request still pending completes with
    /// [`SearchError::Cancelled`]; none is left unresolved. Searches issued
    /// afterwards on a background dispatcher also fail with `Cancelled`.
    /// In-process dispatchers have nothing to tear down.
    pub fn shutdown(&self) {
        if let ActiveChannel::Background(channel) = &self.channel {
            channel.shutdown();
        }
    }
}

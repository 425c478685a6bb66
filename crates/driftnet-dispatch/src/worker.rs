//! Background worker that owns its own provider registry.

use std::error::Error;
use std::sync::Arc;

use driftnet_search_core::{ProviderRegistry, SearchOptions, SearchResult, TorrentRelease};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::debug;

use crate::message::{SearchRequest, SearchResponse};

/// Spawn the shared worker loop.
///
/// Each message is handled on its own task so a slow upstream does not block
/// the queue; replies may therefore leave in a different order than requests
/// arrived.
pub(crate) fn spawn(
    handle: &Handle,
    registry: ProviderRegistry,
    mut requests: mpsc::Receiver<SearchRequest>,
    responses: mpsc::Sender<SearchResponse>,
) {
    handle.spawn(async move {
        let registry = Arc::new(registry);
        while let Some(request) = requests.recv().await {
            let registry = Arc::clone(&registry);
            let responses = responses.clone();
            tokio::spawn(async move {
                let response = handle_request(&registry, request).await;
                if responses.send(response).await.is_err() {
                    debug!("response channel closed before delivery");
                }
            });
        }
        debug!("search worker stopped");
    });
}

async fn handle_request(registry: &ProviderRegistry, request: SearchRequest) -> SearchResponse {
    let SearchRequest {
        correlation_id,
        source_id,
        query,
        options,
    } = request;

    match run_search(registry, &source_id, &query, &options).await {
        Ok(releases) => SearchResponse::ok(correlation_id, releases),
        Err(err) => SearchResponse::err(correlation_id, error_chain(&err)),
    }
}

async fn run_search(
    registry: &ProviderRegistry,
    source_id: &str,
    query: &str,
    options: &SearchOptions,
) -> SearchResult<Vec<TorrentRelease>> {
    let provider = registry.resolve(source_id)?;
    provider.search(query, options).await
}

/// Render an error with its source chain; the wire carries plain text.
fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

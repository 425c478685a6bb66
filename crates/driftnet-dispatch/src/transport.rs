//! In-process and background transport channels.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use driftnet_search_core::{ProviderRegistry, SearchError, SearchResult, TorrentRelease};
use tokio::runtime::{Handle, TryCurrentError};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::message::{SearchRequest, SearchResponse};
use crate::worker;

const REQUEST_BUFFER: usize = 64;
const RESPONSE_BUFFER: usize = 64;

type Completion = oneshot::Sender<SearchResult<Vec<TorrentRelease>>>;

/// Pending-request table, keyed by correlation id.
type PendingMap = Arc<Mutex<HashMap<u64, Completion>>>;

/// Pass-through channel calling the provider on the caller's task.
pub(crate) struct InProcessChannel {
    registry: Arc<ProviderRegistry>,
}

impl InProcessChannel {
    pub(crate) const fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    pub(crate) async fn send(&self, request: SearchRequest) -> SearchResult<Vec<TorrentRelease>> {
        let provider = self.registry.resolve(&request.source_id)?;
        provider.search(&request.query, &request.options).await
    }
}

/// Channel into the shared background worker, correlated by request id.
pub(crate) struct BackgroundChannel {
    requests: Mutex<Option<mpsc::Sender<SearchRequest>>>,
    pending: PendingMap,
}

impl BackgroundChannel {
    /// Spawn the worker and the response router on the current runtime.
    ///
    /// # Errors
    ///
    /// Fails when no Tokio runtime is available to host the worker.
    pub(crate) fn spawn(registry: ProviderRegistry) -> Result<Self, TryCurrentError> {
        let handle = Handle::try_current()?;
        let (requests_tx, requests_rx) = mpsc::channel(REQUEST_BUFFER);
        let (responses_tx, responses_rx) = mpsc::channel(RESPONSE_BUFFER);
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));

        worker::spawn(&handle, registry, requests_rx, responses_tx);
        spawn_router(&handle, Arc::clone(&pending), responses_rx);

        Ok(Self {
            requests: Mutex::new(Some(requests_tx)),
            pending,
        })
    }

    /// Register the pending completion, forward the request, and wait.
    pub(crate) async fn send(&self, request: SearchRequest) -> SearchResult<Vec<TorrentRelease>> {
        let correlation_id = request.correlation_id;
        let sender = self
            .requests
            .lock()
            .expect("request sender mutex poisoned")
            .clone();
        let Some(sender) = sender else {
            return Err(SearchError::Cancelled);
        };

        let (completion, wait) = oneshot::channel();
        self.pending
            .lock()
            .expect("pending request mutex poisoned")
            .insert(correlation_id, completion);

        if sender.send(request).await.is_err() {
            self.pending
                .lock()
                .expect("pending request mutex poisoned")
                .remove(&correlation_id);
            return Err(SearchError::Cancelled);
        }

        // A dropped completion means the channel went away without replying.
        wait.await.unwrap_or(Err(SearchError::Cancelled))
    }

    /// Stop the worker and cancel every still-pending request.
    pub(crate) fn shutdown(&self) {
        let sender = self
            .requests
            .lock()
            .expect("request sender mutex poisoned")
            .take();
        drop(sender);

        let drained: Vec<(u64, Completion)> = {
            let mut pending = self.pending.lock().expect("pending request mutex poisoned");
            pending.drain().collect()
        };
        for (correlation_id, completion) in drained {
            if completion.send(Err(SearchError::Cancelled)).is_err() {
                debug!(correlation_id, "cancelled request had no waiting caller");
            }
        }
    }
}

fn spawn_router(
    handle: &Handle,
    pending: PendingMap,
    mut responses: mpsc::Receiver<SearchResponse>,
) {
    handle.spawn(async move {
        while let Some(response) = responses.recv().await {
            complete(&pending, response);
        }
        debug!("response router stopped");
    });
}

/// Complete the matching pending request; discard responses with no match.
fn complete(pending: &PendingMap, response: SearchResponse) {
    let completion = pending
        .lock()
        .expect("pending request mutex poisoned")
        .remove(&response.correlation_id);
    let Some(completion) = completion else {
        debug!(
            correlation_id = response.correlation_id,
            "discarding response with no pending request"
        );
        return;
    };

    let result = if response.success {
        Ok(response.data.unwrap_or_default())
    } else {
        Err(SearchError::Upstream {
            message: response
                .error
                .unwrap_or_else(|| "upstream failure with no detail".to_string()),
        })
    };
    if completion.send(result).is_err() {
        debug!(
            correlation_id = response.correlation_id,
            "caller went away before completion"
        );
    }
}

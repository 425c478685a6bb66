//! Scripted fakes for the fetch capability and the provider trait.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use driftnet_fetch::{FetchResponse, FetchResult, Fetcher};
use driftnet_search_core::{
    SearchError, SearchOptions, SearchProvider, SearchResult, TorrentRelease, validate_query,
};

/// One scripted route: the first URL containing `fragment` gets this reply.
struct Route {
    fragment: String,
    status: u16,
    body: String,
    delay: Option<Duration>,
}

/// Fetcher fake that replies from a script and records every requested URL.
///
/// Routes are matched by substring in registration order; unmatched URLs get
/// a 404 with an empty body. An optional per-route delay makes ordering
/// deterministic in correlation tests.
#[derive(Default)]
pub struct ScriptedFetcher {
    routes: Vec<Route>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    /// Construct a fetcher with no routes; every request 404s.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route replying with the given status and body.
    #[must_use]
    pub fn respond(mut self, fragment: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        self.routes.push(Route {
            fragment: fragment.into(),
            status,
            body: body.into(),
            delay: None,
        });
        self
    }

    /// Add a route that sleeps before replying.
    #[must_use]
    pub fn respond_after(
        mut self,
        fragment: impl Into<String>,
        delay: Duration,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.routes.push(Route {
            fragment: fragment.into(),
            status,
            body: body.into(),
            delay: Some(delay),
        });
        self
    }

    /// URLs requested so far, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the request ledger mutex has been poisoned.
    #[must_use]
    pub fn requested_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("request ledger mutex poisoned")
            .clone()
    }

    /// Number of fetch calls issued so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requested_urls().len()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn get(&self, url: &str) -> FetchResult<FetchResponse> {
        self.requests
            .lock()
            .expect("request ledger mutex poisoned")
            .push(url.to_string());

        let route = self.routes.iter().find(|route| url.contains(&route.fragment));
        let Some(route) = route else {
            return Ok(FetchResponse {
                url: url.to_string(),
                status: 404,
                body: String::new(),
            });
        };

        if let Some(delay) = route.delay {
            tokio::time::sleep(delay).await;
        }

        Ok(FetchResponse {
            url: url.to_string(),
            status: route.status,
            body: route.body.clone(),
        })
    }
}

/// Provider fake with scripted behaviour and a call counter.
///
/// The echoing variant titles its single result after the trimmed query,
/// which lets correlation tests tell concurrent completions apart.
pub struct StubProvider {
    source_id: &'static str,
    releases: Vec<TorrentRelease>,
    echo_query: bool,
    fail_with: Option<String>,
    delay: Option<Duration>,
    delay_for: Option<(String, Duration)>,
    calls: Arc<Mutex<usize>>,
}

impl StubProvider {
    fn base(source_id: &'static str) -> Self {
        Self {
            source_id,
            releases: Vec::new(),
            echo_query: false,
            fail_with: None,
            delay: None,
            delay_for: None,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Provider that answers every query with the given releases.
    #[must_use]
    pub fn answering(source_id: &'static str, releases: Vec<TorrentRelease>) -> Self {
        Self {
            releases,
            ..Self::base(source_id)
        }
    }

    /// Provider that answers with one release titled after the query.
    #[must_use]
    pub fn echoing(source_id: &'static str) -> Self {
        Self {
            echo_query: true,
            ..Self::base(source_id)
        }
    }

    /// Provider that fails every query with an upstream-style message.
    #[must_use]
    pub fn failing(source_id: &'static str, message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::base(source_id)
        }
    }

    /// Sleep for `delay` before answering any query.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sleep before answering the one matching query; others stay fast.
    #[must_use]
    pub fn slow_on(mut self, query: impl Into<String>, delay: Duration) -> Self {
        self.delay_for = Some((query.into(), delay));
        self
    }

    /// Count calls into an externally owned counter.
    ///
    /// Useful when a registry factory rebuilds the provider and the test
    /// needs one counter across all instances.
    #[must_use]
    pub fn counting_into(mut self, calls: Arc<Mutex<usize>>) -> Self {
        self.calls = calls;
        self
    }

    /// Shared handle to the call counter.
    #[must_use]
    pub fn call_counter(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl SearchProvider for StubProvider {
    fn source_id(&self) -> &'static str {
        self.source_id
    }

    fn display_name(&self) -> &'static str {
        "Stub"
    }

    async fn search(
        &self,
        query: &str,
        _options: &SearchOptions,
    ) -> SearchResult<Vec<TorrentRelease>> {
        let query = validate_query(query)?;
        *self.calls.lock().expect("call counter mutex poisoned") += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some((slow_query, delay)) = &self.delay_for
            && query == slow_query.as_str()
        {
            tokio::time::sleep(*delay).await;
        }

        if let Some(message) = &self.fail_with {
            return Err(SearchError::Upstream {
                message: message.clone(),
            });
        }

        if self.echo_query {
            return Ok(vec![release(self.source_id, query)]);
        }
        Ok(self.releases.clone())
    }
}

/// Minimal valid release for a given source, title parameterised.
#[must_use]
pub fn release(source: &str, title: &str) -> TorrentRelease {
    TorrentRelease {
        title: title.to_string(),
        source_id: source.to_string(),
        ..TorrentRelease::default()
    }
}

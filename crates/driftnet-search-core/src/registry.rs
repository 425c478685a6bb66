//! Immutable source-id to provider mapping.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{SearchError, SearchResult};
use crate::provider::SearchProvider;

/// Registry mapping source identifiers to shared provider instances.
///
/// Populated during startup wiring and treated as read-only afterwards.
/// Lookups are exact-match and case-sensitive.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn SearchProvider>>,
}

impl ProviderRegistry {
    /// Construct an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under its own source identifier.
    ///
    /// Registering a second provider with the same identifier replaces the
    /// first; startup wiring is expected to keep identifiers unique.
    pub fn register(&mut self, provider: Arc<dyn SearchProvider>) {
        self.providers
            .insert(provider.source_id().to_string(), provider);
    }

    /// Resolve a source identifier to its provider.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownSource`] when no provider is registered
    /// under the exact identifier.
    pub fn resolve(&self, source_id: &str) -> SearchResult<Arc<dyn SearchProvider>> {
        self.providers
            .get(source_id)
            .cloned()
            .ok_or_else(|| SearchError::UnknownSource {
                source_id: source_id.to_string(),
            })
    }

    /// Whether a provider is registered under the exact identifier.
    #[must_use]
    pub fn contains(&self, source_id: &str) -> bool {
        self.providers.contains_key(source_id)
    }

    /// Registered source identifiers, sorted for stable output.
    #[must_use]
    pub fn source_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SearchOptions, TorrentRelease};
    use async_trait::async_trait;

    struct StubProvider(&'static str);

    #[async_trait]
    impl SearchProvider for StubProvider {
        fn source_id(&self) -> &'static str {
            self.0
        }

        fn display_name(&self) -> &'static str {
            "Stub"
        }

        async fn search(
            &self,
            _query: &str,
            _options: &SearchOptions,
        ) -> SearchResult<Vec<TorrentRelease>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn resolve_known_source() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(StubProvider("nyaasi")));
        let provider = registry.resolve("nyaasi").expect("registered source");
        assert_eq!(provider.source_id(), "nyaasi");
    }

    #[test]
    fn resolve_is_exact_and_case_sensitive() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(StubProvider("nyaasi")));

        for miss in ["NyaaSi", "nyaasi ", "nyaa"] {
            let err = registry
                .resolve(miss)
                .err()
                .unwrap_or_else(|| panic!("expected unknown source for {miss:?}"));
            match err {
                SearchError::UnknownSource { source_id } => assert_eq!(source_id, miss),
                other => panic!("expected unknown source for {miss:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn source_ids_are_sorted() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(StubProvider("piratebay")));
        registry.register(Arc::new(StubProvider("animetosho")));
        assert_eq!(registry.source_ids(), vec!["animetosho", "piratebay"]);
    }
}

//! Startup wiring for the built-in providers.

use std::sync::Arc;

use driftnet_fetch::Fetcher;
use driftnet_search_core::ProviderRegistry;

use crate::{AnimeTosho, NyaaSi, PirateBay, SeaDex};

/// Build a registry containing every built-in provider, sharing one fetcher.
#[must_use]
pub fn builtin_registry(fetcher: &Arc<dyn Fetcher>) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    registry.register(Arc::new(AnimeTosho::new(Arc::clone(fetcher))));
    registry.register(Arc::new(NyaaSi::new(Arc::clone(fetcher))));
    registry.register(Arc::new(PirateBay::new(Arc::clone(fetcher))));
    registry.register(Arc::new(SeaDex::new(Arc::clone(fetcher))));
    registry
}

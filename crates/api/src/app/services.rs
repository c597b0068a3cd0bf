use std::sync::Arc;

use catalog_products::{InMemoryProductRegistry, ProductCatalog};

/// Shared state handed to handlers. The catalog is injected at construction,
/// never reached through globals.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<dyn ProductCatalog>,
}

impl AppServices {
    pub fn new(catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { catalog }
    }

    /// Dev/default wiring: process-lifetime in-memory registry.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryProductRegistry::new()))
    }

    pub fn catalog(&self) -> &dyn ProductCatalog {
        self.catalog.as_ref()
    }
}

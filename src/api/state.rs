use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    config::Config,
    services::{
        providers::{ProductSource, SimulatedSource},
        ProductCatalog,
    },
};

/// Shared application state
///
/// The catalog assumes exclusive access, so every handler goes through the
/// lock: readers for queries, a writer for loads and clears.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RwLock<ProductCatalog>>,
    pub source: Arc<dyn ProductSource>,
    pub export_path: PathBuf,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    /// Creates state with an empty catalog and the simulated product source
    pub fn new(config: &Config) -> Self {
        Self::with_catalog(ProductCatalog::new(config.category.clone()), config)
    }

    /// Creates state around an already-populated catalog
    pub fn with_catalog(catalog: ProductCatalog, config: &Config) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            source: Arc::new(SimulatedSource::new()),
            export_path: PathBuf::from(&config.export_path),
        }
    }

    /// Replaces the product source
    pub fn with_source(mut self, source: Arc<dyn ProductSource>) -> Self {
        self.source = source;
        self
    }
}

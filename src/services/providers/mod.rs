//! Product data sources
//!
//! A source turns a search query into raw product entries (the same loosely
//! typed JSON bags accepted by [`crate::services::ingest`]). Fetching is kept
//! apart from analysis: the catalog only ever sees entries a source already
//! returned.
use serde_json::Value;

use crate::error::AppResult;

pub mod simulated;

pub use simulated::SimulatedSource;

/// Trait for product data sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProductSource: Send + Sync {
    /// Raw entries matching `query`; an empty query asks for everything
    async fn fetch(&self, query: &str) -> AppResult<Vec<Value>>;

    /// Source name for logging and the `source` field of collected entries
    fn name(&self) -> &'static str;
}

/// Fetches from `source`, tagging entries that lack a `source` field
///
/// Touches no catalog, so callers can run it before taking any lock.
pub async fn fetch_tagged(source: &dyn ProductSource, query: &str) -> AppResult<Vec<Value>> {
    let mut entries = source.fetch(query).await.map_err(|e| {
        tracing::error!(source = source.name(), query, error = %e, "Product source failed");
        e
    })?;

    for entry in entries.iter_mut() {
        if let Value::Object(map) = entry {
            map.entry("source")
                .or_insert_with(|| Value::String(source.name().to_string()));
        }
    }

    tracing::info!(
        source = source.name(),
        query,
        fetched = entries.len(),
        "Collected product entries"
    );

    Ok(entries)
}

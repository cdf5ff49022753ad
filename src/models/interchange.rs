use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{CatalogStatistics, Product};

/// Outcome of loading a batch of product entries
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct LoadReport {
    pub added: usize,
    pub rejected: Vec<RejectedEntry>,
}

/// An entry skipped during loading
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RejectedEntry {
    /// Position in the input array; absent when the whole document was refused
    pub index: Option<usize>,
    /// The entry's `nom`, when it had one
    pub name: Option<String>,
    pub reason: String,
}

impl LoadReport {
    /// A report for input that produced nothing at all
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            added: 0,
            rejected: vec![RejectedEntry {
                index: None,
                name: None,
                reason: reason.into(),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub category: String,
    pub generated_at: DateTime<Utc>,
    pub budget_max: Option<f64>,
}

/// Snapshot of a catalog written to disk or returned by the export endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument<'a> {
    pub metadata: ExportMetadata,
    pub statistics: Option<CatalogStatistics>,
    pub top_products: Vec<&'a Product>,
    pub products: &'a [Product],
}

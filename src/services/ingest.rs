//! Loading loosely-typed product entries into a catalog.
//!
//! A bad entry never aborts a load: it is logged, recorded in the
//! [`LoadReport`] and skipped.

use serde_json::Value;

use crate::{
    error::AppError,
    models::{LoadReport, NewProduct, RejectedEntry},
    services::catalog::ProductCatalog,
};

/// Top-level key accepted when the document is an object
pub const PRODUCTS_KEY: &str = "produits";

pub const UNRECOGNIZED_FORMAT: &str = "unrecognized format";

/// Adds every well-formed entry, skipping the rest
pub fn ingest_entries(catalog: &mut ProductCatalog, entries: Vec<Value>) -> LoadReport {
    let mut report = LoadReport::default();

    for (index, entry) in entries.into_iter().enumerate() {
        let name = entry
            .get("nom")
            .and_then(Value::as_str)
            .map(str::to_string);

        match add_entry(catalog, entry) {
            Ok(()) => report.added += 1,
            Err(e) => {
                tracing::warn!(
                    index,
                    name = name.as_deref().unwrap_or("?"),
                    error = %e,
                    "Skipping malformed product entry"
                );
                report.rejected.push(RejectedEntry {
                    index: Some(index),
                    name,
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        category = catalog.category(),
        added = report.added,
        rejected = report.rejected.len(),
        "Product entries loaded"
    );

    report
}

/// Accepts an array of entries or an object holding one under `produits`
pub fn ingest_document(catalog: &mut ProductCatalog, document: Value) -> LoadReport {
    match document {
        Value::Array(entries) => ingest_entries(catalog, entries),
        Value::Object(mut map) => match map.remove(PRODUCTS_KEY) {
            Some(Value::Array(entries)) => ingest_entries(catalog, entries),
            _ => unrecognized(),
        },
        _ => unrecognized(),
    }
}

/// Parses raw JSON text, then behaves like [`ingest_document`]
pub fn ingest_str(catalog: &mut ProductCatalog, json: &str) -> LoadReport {
    match serde_json::from_str::<Value>(json) {
        Ok(document) => ingest_document(catalog, document),
        Err(e) => {
            tracing::warn!(error = %e, "Product document is not valid JSON");
            LoadReport::failed(format!("invalid JSON: {}", e))
        }
    }
}

fn add_entry(catalog: &mut ProductCatalog, entry: Value) -> Result<(), AppError> {
    let input: NewProduct = serde_json::from_value(entry)?;
    catalog.add(input)?;
    Ok(())
}

fn unrecognized() -> LoadReport {
    tracing::warn!("Product document has an unrecognized top-level shape");
    LoadReport::failed(UNRECOGNIZED_FORMAT)
}

use std::path::Path;

use crate::{
    error::AppResult,
    models::{ExportDocument, LoadReport},
    services::{catalog::ProductCatalog, ingest},
};

/// Loads a JSON product file into the catalog
///
/// A missing or unreadable file is reported in the returned [`LoadReport`]
/// and yields zero products; it is never an error for the caller.
pub async fn load_file(catalog: &mut ProductCatalog, path: impl AsRef<Path>) -> LoadReport {
    let path = path.as_ref();

    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not read product file");
            return LoadReport::failed(format!("could not read {}: {}", path.display(), e));
        }
    };

    let report = ingest::ingest_str(catalog, &contents);
    tracing::info!(
        path = %path.display(),
        added = report.added,
        rejected = report.rejected.len(),
        "Product file loaded"
    );
    report
}

/// Writes an export snapshot as pretty-printed JSON, creating parent directories
pub async fn write_export(path: impl AsRef<Path>, document: &ExportDocument<'_>) -> AppResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(document)?;
    tokio::fs::write(path, json).await?;

    tracing::info!(
        path = %path.display(),
        products = document.products.len(),
        "Export written"
    );
    Ok(())
}

use chrono::Utc;

use crate::{
    models::{ExportDocument, ExportMetadata, SortCriterion},
    services::catalog::ProductCatalog,
};

/// Number of ranked products included in an export
pub const EXPORT_TOP_N: usize = 10;

/// Snapshot of the catalog: metadata, statistics, best products and all products
pub fn build_export(catalog: &ProductCatalog, budget_max: Option<f64>) -> ExportDocument<'_> {
    ExportDocument {
        metadata: ExportMetadata {
            category: catalog.category().to_string(),
            generated_at: Utc::now(),
            budget_max,
        },
        statistics: catalog.statistics(),
        top_products: catalog.top(EXPORT_TOP_N, budget_max, SortCriterion::Score),
        products: catalog.products(),
    }
}

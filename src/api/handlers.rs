use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    db,
    error::AppResult,
    middleware::request_id::RequestId,
    models::{
        CatalogStatistics, LoadReport, NewProduct, Product, RecommendationCriteria, SortCriterion,
        DEFAULT_TOP_N,
    },
    services::{catalog::ProductFilter, export, ingest, providers, recommend, report},
};

use super::AppState;

const DEFAULT_REPORT_TOP_N: usize = 5;

// Request types

/// Query for `GET /products`; `brands` is a comma-separated list
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub max_price: Option<f64>,
    pub brands: Option<String>,
    pub min_rating: Option<f64>,
    pub feature: Option<String>,
}

impl From<ProductListQuery> for ProductFilter {
    fn from(query: ProductListQuery) -> Self {
        let brands = query.brands.map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .map(str::to_string)
                .collect()
        });

        ProductFilter {
            max_price: query.max_price,
            brands,
            min_rating: query.min_rating,
            feature: query.feature,
        }
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    #[serde(default = "default_top_n")]
    pub n: usize,
    pub max_price: Option<f64>,
    #[serde(default)]
    pub criterion: SortCriterion,
}

fn default_report_top_n() -> usize {
    DEFAULT_REPORT_TOP_N
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub max_price: Option<f64>,
    #[serde(default = "default_report_top_n")]
    pub n: usize,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub max_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct CollectRequest {
    #[serde(default)]
    pub query: String,
}

// Handlers

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let catalog = state.catalog.read().await;
    Json(json!({ "status": "healthy", "products": catalog.len() }))
}

/// List products, optionally narrowed by chained filters
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Json<Vec<Product>> {
    let filter = ProductFilter::from(query);
    let catalog = state.catalog.read().await;
    Json(catalog.filter(&filter).into_iter().cloned().collect())
}

/// Add a single product
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<NewProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let mut catalog = state.catalog.write().await;
    let product = catalog.add(input)?.clone();

    tracing::info!(
        id = %product.id,
        name = %product.name,
        score = product.quality_score(),
        "Product added"
    );

    Ok((StatusCode::CREATED, Json(product)))
}

/// Remove every product
pub async fn clear_products(State(state): State<AppState>) -> StatusCode {
    let mut catalog = state.catalog.write().await;
    let removed = catalog.len();
    catalog.clear();
    tracing::info!(removed, "Catalog cleared");
    StatusCode::NO_CONTENT
}

/// Load a JSON document of product entries
pub async fn import_products(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(document): Json<Value>,
) -> Json<LoadReport> {
    let mut catalog = state.catalog.write().await;
    let report = ingest::ingest_document(&mut catalog, document);

    tracing::info!(
        request_id = %request_id,
        added = report.added,
        rejected = report.rejected.len(),
        "Import processed"
    );

    Json(report)
}

/// Pull entries from the configured product source
pub async fn collect_products(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<CollectRequest>,
) -> AppResult<Json<LoadReport>> {
    tracing::info!(
        request_id = %request_id,
        source = state.source.name(),
        query = %request.query,
        "Collecting products"
    );

    let entries = providers::fetch_tagged(state.source.as_ref(), &request.query).await?;

    let mut catalog = state.catalog.write().await;
    let report = ingest::ingest_entries(&mut catalog, entries);
    Ok(Json(report))
}

/// Ranked products
pub async fn top_products(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> Json<Vec<Product>> {
    let catalog = state.catalog.read().await;
    let top = catalog.top(query.n, query.max_price, query.criterion);
    Json(top.into_iter().cloned().collect())
}

/// Aggregate statistics; `null` for an empty catalog
pub async fn statistics(State(state): State<AppState>) -> Json<Option<CatalogStatistics>> {
    let catalog = state.catalog.read().await;
    Json(catalog.statistics())
}

/// Recommendation for the given constraints
pub async fn recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(criteria): Json<RecommendationCriteria>,
) -> AppResult<Json<Value>> {
    let catalog = state.catalog.read().await;
    let recommendation = recommend(&catalog, &criteria);

    tracing::info!(
        request_id = %request_id,
        matching = recommendation.matching_count,
        budget_max = ?criteria.budget_max,
        "Recommendation served"
    );

    Ok(Json(serde_json::to_value(&recommendation)?))
}

/// Plain-text analysis report
pub async fn analysis_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> String {
    let catalog = state.catalog.read().await;
    report::render_report(&catalog, query.max_price, query.n)
}

/// Export snapshot returned in the response body
pub async fn get_export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Json<Value>> {
    let catalog = state.catalog.read().await;
    let document = export::build_export(&catalog, query.max_price);
    Ok(Json(serde_json::to_value(&document)?))
}

/// Export snapshot written to the configured export path
pub async fn write_export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Json<Value>> {
    let catalog = state.catalog.read().await;
    let document = export::build_export(&catalog, query.max_price);
    db::write_export(&state.export_path, &document).await?;

    Ok(Json(json!({
        "path": state.export_path.display().to_string(),
        "products": document.products.len(),
    })))
}

mod catalog;
mod interchange;
mod product;
mod recommendation;

pub use catalog::{CatalogStatistics, SortCriterion};
pub use interchange::{ExportDocument, ExportMetadata, LoadReport, RejectedEntry};
pub use product::{
    ExtraValue, Extras, NewProduct, PriceTier, Product, DEFAULT_RATING, REFERENCE_PRICE_KEY,
};
pub use recommendation::{
    Recommendation, RecommendationCriteria, DEFAULT_TOP_N, RECOMMENDATION_MIN_RATING,
};

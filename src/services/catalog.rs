use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::{
    error::ProductError,
    models::{CatalogStatistics, NewProduct, Product, SortCriterion},
};

/// Default threshold for [`ProductCatalog::filter_by_min_rating`]
pub const DEFAULT_MIN_RATING: f64 = 4.0;

/// Several filters combined with logical AND; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub max_price: Option<f64>,
    pub brands: Option<Vec<String>>,
    pub min_rating: Option<f64>,
    pub feature: Option<String>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        self.max_price.map_or(true, |budget| within_budget(product, budget))
            && self
                .brands
                .as_deref()
                .map_or(true, |brands| brand_allowed(product, &lowercase_all(brands)))
            && self.min_rating.map_or(true, |min| product.rating >= min)
            && self
                .feature
                .as_deref()
                .map_or(true, |feature| has_feature(product, &feature.to_lowercase()))
    }
}

/// Ordered, in-memory collection of products under analysis
///
/// Insertion order is preserved and duplicates are kept. Every query returns
/// a fresh view over the stored products; nothing here reorders or edits the
/// store itself.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    category: String,
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Creates an empty catalog for the given product category
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            products: Vec::new(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Builds a product from the input and appends it
    pub fn add(&mut self, input: NewProduct) -> Result<&Product, ProductError> {
        let product = Product::create(input)?;
        Ok(self.push(product))
    }

    /// Appends an already-built product
    pub fn push(&mut self, product: Product) -> &Product {
        self.products.push(product);
        &self.products[self.products.len() - 1]
    }

    pub fn clear(&mut self) {
        self.products.clear();
    }

    /// Products priced at or under the ceiling
    pub fn filter_by_budget(&self, budget_max: f64) -> Vec<&Product> {
        self.filter_with(|p| within_budget(p, budget_max))
    }

    /// Products whose brand matches one of `brands`, ignoring case
    pub fn filter_by_brands<S: AsRef<str>>(&self, brands: &[S]) -> Vec<&Product> {
        let allowed = lowercase_all(brands);
        self.filter_with(|p| brand_allowed(p, &allowed))
    }

    /// Products rated at or above `min_rating` (defaults to 4.0)
    pub fn filter_by_min_rating(&self, min_rating: Option<f64>) -> Vec<&Product> {
        let threshold = min_rating.unwrap_or(DEFAULT_MIN_RATING);
        self.filter_with(|p| p.rating >= threshold)
    }

    /// Products with a feature tag containing `feature`, ignoring case
    pub fn filter_by_feature(&self, feature: &str) -> Vec<&Product> {
        let needle = feature.to_lowercase();
        self.filter_with(|p| has_feature(p, &needle))
    }

    /// Products satisfying an arbitrary predicate
    pub fn filter_with<F>(&self, predicate: F) -> Vec<&Product>
    where
        F: Fn(&Product) -> bool,
    {
        self.products.iter().filter(|p| predicate(*p)).collect()
    }

    /// Products passing every criterion of `filter`
    pub fn filter(&self, filter: &ProductFilter) -> Vec<&Product> {
        self.filter_with(|p| filter.matches(p))
    }

    /// The first `n` products by `criterion`, optionally under a price ceiling
    pub fn top(
        &self,
        n: usize,
        budget_max: Option<f64>,
        criterion: SortCriterion,
    ) -> Vec<&Product> {
        let mut candidates = match budget_max {
            Some(budget) => self.filter_by_budget(budget),
            None => self.products.iter().collect(),
        };

        rank(&mut candidates, criterion);
        candidates.truncate(n);
        candidates
    }

    /// Aggregate figures, or `None` for an empty catalog
    pub fn statistics(&self) -> Option<CatalogStatistics> {
        if self.products.is_empty() {
            return None;
        }

        let count = self.products.len();
        let prices = self.products.iter().map(|p| p.price);
        let total_price: f64 = prices.clone().sum();
        let min_price = prices.clone().fold(f64::INFINITY, f64::min);
        let max_price = prices.fold(f64::NEG_INFINITY, f64::max);

        let ratings: Vec<f64> = self
            .products
            .iter()
            .map(|p| p.rating)
            .filter(|r| *r > 0.0)
            .collect();
        let average_rating = if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
        };

        let total_score: f64 = self.products.iter().map(Product::quality_score).sum();
        let brands: BTreeSet<String> = self.products.iter().map(|p| p.brand.clone()).collect();

        Some(CatalogStatistics {
            count,
            average_price: total_price / count as f64,
            min_price,
            max_price,
            average_rating,
            average_score: total_score / count as f64,
            brand_count: brands.len(),
            brands,
        })
    }
}

pub(crate) fn within_budget(product: &Product, budget_max: f64) -> bool {
    product.price <= budget_max
}

pub(crate) fn lowercase_all<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values.iter().map(|v| v.as_ref().to_lowercase()).collect()
}

/// `allowed` must already be lowercased
pub(crate) fn brand_allowed(product: &Product, allowed: &[String]) -> bool {
    let brand = product.brand.to_lowercase();
    allowed.iter().any(|b| *b == brand)
}

fn has_feature(product: &Product, needle: &str) -> bool {
    product
        .features
        .iter()
        .any(|f| f.to_lowercase().contains(needle))
}

/// Total order, so unvalidated NaN ratings sort ahead of every number
fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Stable sort; equal keys keep their relative order
pub(crate) fn rank(products: &mut [&Product], criterion: SortCriterion) {
    match criterion {
        SortCriterion::Score => {
            products.sort_by(|a, b| descending(a.quality_score(), b.quality_score()))
        }
        SortCriterion::Price => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortCriterion::Rating => products.sort_by(|a, b| descending(a.rating, b.rating)),
        SortCriterion::Popularity => products.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
        SortCriterion::Insertion => {}
    }
}

use serde::{Deserialize, Serialize};

use super::Product;

/// Minimum rating applied by the recommendation pipeline.
///
/// Deliberately looser than the standalone rating filter's default
/// ([`crate::services::catalog::DEFAULT_MIN_RATING`]).
pub const RECOMMENDATION_MIN_RATING: f64 = 3.5;

pub const DEFAULT_TOP_N: usize = 3;

fn default_min_rating() -> f64 {
    RECOMMENDATION_MIN_RATING
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

/// Constraints for a recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationCriteria {
    /// Inclusive price ceiling
    #[serde(default)]
    pub budget_max: Option<f64>,
    /// Case-insensitive brand allow-list; empty means any brand
    #[serde(default)]
    pub preferred_brands: Option<Vec<String>>,
    #[serde(default = "default_min_rating")]
    pub min_rating: f64,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for RecommendationCriteria {
    fn default() -> Self {
        Self {
            budget_max: None,
            preferred_brands: None,
            min_rating: RECOMMENDATION_MIN_RATING,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl RecommendationCriteria {
    pub fn with_budget(mut self, budget_max: f64) -> Self {
        self.budget_max = Some(budget_max);
        self
    }

    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_brands = Some(brands.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = min_rating;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

/// Outcome of a recommendation request, borrowing from the catalog
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation<'a> {
    /// Products that passed every filter, before truncation
    pub matching_count: usize,
    /// Up to `top_n` products, best score first
    pub top: Vec<&'a Product>,
    pub best: Option<&'a Product>,
    /// Cheapest among all matching products
    pub cheapest: Option<&'a Product>,
    /// Highest rated among all matching products
    pub highest_rated: Option<&'a Product>,
    pub criteria: RecommendationCriteria,
}

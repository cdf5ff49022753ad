use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sort key used when ranking products
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SortCriterion {
    /// Highest quality score first
    #[default]
    Score,
    /// Cheapest first
    Price,
    /// Best rated first
    Rating,
    /// Most reviewed first
    Popularity,
    /// Keep insertion order; any unrecognized criterion lands here
    Insertion,
}

impl From<&str> for SortCriterion {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "score" => SortCriterion::Score,
            "price" | "prix" => SortCriterion::Price,
            "rating" | "note" => SortCriterion::Rating,
            "popularity" | "popularite" | "popularité" => SortCriterion::Popularity,
            _ => SortCriterion::Insertion,
        }
    }
}

impl From<String> for SortCriterion {
    fn from(value: String) -> Self {
        SortCriterion::from(value.as_str())
    }
}

/// Aggregate figures over a non-empty catalog
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogStatistics {
    pub count: usize,
    pub average_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    /// Mean over products rated above zero; `None` if there are none
    pub average_rating: Option<f64>,
    pub average_score: f64,
    pub brands: BTreeSet<String>,
    pub brand_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criterion_parsing() {
        assert_eq!(SortCriterion::from("score"), SortCriterion::Score);
        assert_eq!(SortCriterion::from("PRICE"), SortCriterion::Price);
        assert_eq!(SortCriterion::from("prix"), SortCriterion::Price);
        assert_eq!(SortCriterion::from("note"), SortCriterion::Rating);
        assert_eq!(SortCriterion::from("popularite"), SortCriterion::Popularity);
        assert_eq!(SortCriterion::from("freshness"), SortCriterion::Insertion);
    }

    #[test]
    fn test_criterion_serde() {
        let criterion: SortCriterion = serde_json::from_str("\"rating\"").unwrap();
        assert_eq!(criterion, SortCriterion::Rating);

        let unknown: SortCriterion = serde_json::from_str("\"vibes\"").unwrap();
        assert_eq!(unknown, SortCriterion::Insertion);

        assert_eq!(serde_json::to_string(&SortCriterion::Popularity).unwrap(), "\"popularity\"");
    }
}

//! Offline stand-in for a marketplace scraper
//!
//! Serves a fixed set of listings from memory so the collection flow can be
//! exercised without network access.
use serde_json::{json, Value};

use crate::{error::AppResult, services::providers::ProductSource};

#[derive(Debug, Clone)]
pub struct SimulatedSource {
    listings: Vec<Value>,
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedSource {
    /// A source preloaded with a small mixed-category listing set
    pub fn new() -> Self {
        Self::with_listings(default_listings())
    }

    pub fn with_listings(listings: Vec<Value>) -> Self {
        Self { listings }
    }

    fn matches(listing: &Value, needle: &str) -> bool {
        let field_matches = |key: &str| {
            listing
                .get(key)
                .and_then(Value::as_str)
                .is_some_and(|s| s.to_lowercase().contains(needle))
        };
        let tag_matches = listing
            .get("caracteristiques")
            .and_then(Value::as_array)
            .is_some_and(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .any(|t| t.to_lowercase().contains(needle))
            });

        field_matches("nom") || field_matches("marque") || tag_matches
    }
}

#[async_trait::async_trait]
impl ProductSource for SimulatedSource {
    async fn fetch(&self, query: &str) -> AppResult<Vec<Value>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(self.listings.clone());
        }

        Ok(self
            .listings
            .iter()
            .filter(|listing| Self::matches(listing, &needle))
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

fn default_listings() -> Vec<Value> {
    vec![
        json!({
            "nom": "Galaxy S24", "marque": "Samsung", "prix": 899, "note": 4.6, "nb_avis": 1500,
            "caracteristiques": ["5G", "Android", "256GB"],
            "url": "https://example.com/galaxy-s24"
        }),
        json!({
            "nom": "iPhone 15", "marque": "Apple", "prix": 999, "note": 4.7, "nb_avis": 3000,
            "caracteristiques": ["5G", "iOS", "128GB"],
            "url": "https://example.com/iphone-15"
        }),
        json!({
            "nom": "Pixel 8", "marque": "Google", "prix": 699, "note": 4.5, "nb_avis": 800,
            "caracteristiques": ["5G", "Android", "128GB"],
            "url": "https://example.com/pixel-8"
        }),
        json!({
            "nom": "MacBook Air M2", "marque": "Apple", "prix": 1299, "note": 4.8, "nb_avis": 3200,
            "caracteristiques": ["M2", "8GB RAM", "256GB SSD"],
            "extra": {"prix_reference": 1500}
        }),
        json!({
            "nom": "XPS 13", "marque": "Dell", "prix": 1199, "note": 4.5, "nb_avis": 1100,
            "caracteristiques": ["i5", "8GB RAM", "256GB SSD"],
            "extra": {"prix_reference": 1500}
        }),
        json!({
            "nom": "WH-1000XM5", "marque": "Sony", "prix": 399, "note": 4.8, "nb_avis": 3200,
            "caracteristiques": ["Noise cancelling", "Bluetooth"]
        }),
        json!({
            "nom": "Galaxy Buds2 Pro", "marque": "Samsung", "prix": 229,
            "note": 4.5, "nb_avis": 2100,
            "caracteristiques": ["Noise cancelling", "Bluetooth"],
            "stock": false
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_returns_everything() {
        let source = SimulatedSource::new();
        let listings = tokio_test::block_on(source.fetch("  ")).unwrap();
        assert_eq!(listings.len(), 7);
    }

    #[tokio::test]
    async fn test_query_matches_name_brand_and_tags() {
        let source = SimulatedSource::new();

        let by_brand = source.fetch("apple").await.unwrap();
        assert_eq!(by_brand.len(), 2);

        let by_tag = source.fetch("NOISE").await.unwrap();
        assert_eq!(by_tag.len(), 2);

        let by_name = source.fetch("pixel").await.unwrap();
        assert_eq!(by_name[0]["nom"], "Pixel 8");

        assert!(source.fetch("toaster").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_custom_listings() {
        let source = SimulatedSource::with_listings(vec![json!({
            "nom": "Kettle", "marque": "Bosch", "prix": 40
        })]);
        assert_eq!(source.fetch("").await.unwrap().len(), 1);
        assert_eq!(source.name(), "simulated");
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::{error::ProductError, services::scoring};

/// Extension-bag key holding a category-specific reference price
pub const REFERENCE_PRICE_KEY: &str = "prix_reference";

/// Rating assumed when a record does not carry one
pub const DEFAULT_RATING: f64 = 4.0;

/// A value stored in a product's extension bag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ExtraValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ExtraValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ExtraValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for ExtraValue {
    fn from(value: f64) -> Self {
        ExtraValue::Number(value)
    }
}

impl From<bool> for ExtraValue {
    fn from(value: bool) -> Self {
        ExtraValue::Bool(value)
    }
}

impl From<&str> for ExtraValue {
    fn from(value: &str) -> Self {
        ExtraValue::Text(value.to_string())
    }
}

pub type Extras = BTreeMap<String, ExtraValue>;

/// Coarse price bracket derived from a product's price
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PriceTier {
    Entry,
    Mid,
    HighEnd,
    Premium,
}

impl PriceTier {
    /// Boundaries are strict: a price of exactly 50 is already `Mid`
    pub fn for_price(price: f64) -> Self {
        if price < 50.0 {
            PriceTier::Entry
        } else if price < 150.0 {
            PriceTier::Mid
        } else if price < 300.0 {
            PriceTier::HighEnd
        } else {
            PriceTier::Premium
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceTier::Entry => "entry",
            PriceTier::Mid => "mid",
            PriceTier::HighEnd => "high-end",
            PriceTier::Premium => "premium",
        }
    }
}

impl std::fmt::Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn default_rating() -> f64 {
    DEFAULT_RATING
}

fn default_in_stock() -> bool {
    true
}

/// Input used to construct a [`Product`]
///
/// Field names follow the JSON interchange format (`nom`, `marque`, `prix`, ...).
/// Keys this struct does not know about are ignored, so a serialized
/// [`Product`] can be fed back in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "marque")]
    pub brand: String,
    #[serde(rename = "prix")]
    pub price: f64,
    #[serde(rename = "note", default = "default_rating")]
    pub rating: f64,
    #[serde(rename = "nb_avis", default)]
    pub review_count: u32,
    #[serde(rename = "caracteristiques", default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub source: String,
    #[serde(rename = "stock", default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(rename = "date_ajout", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub extra: Extras,
}

impl NewProduct {
    /// Creates an input with the required fields and defaults for the rest
    pub fn new(name: impl Into<String>, brand: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            brand: brand.into(),
            price,
            rating: DEFAULT_RATING,
            review_count: 0,
            features: Vec::new(),
            url: String::new(),
            source: String::new(),
            in_stock: true,
            created_at: None,
            extra: Extras::new(),
        }
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn reviews(mut self, review_count: u32) -> Self {
        self.review_count = review_count;
        self
    }

    pub fn features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<ExtraValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Shorthand for setting the `prix_reference` extension
    pub fn reference_price(self, reference: f64) -> Self {
        self.extra(REFERENCE_PRICE_KEY, reference)
    }
}

/// A product under analysis, with its quality score frozen at construction
///
/// The public fields may be edited after creation; the score is **not**
/// recomputed when they are. Rebuild the product through [`Product::create`]
/// to obtain a fresh score.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub rating: f64,
    pub review_count: u32,
    pub features: Vec<String>,
    pub url: String,
    pub source: String,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
    pub extra: Extras,
    quality_score: f64,
}

/// Wire shape of a product, including the derived score and tier
#[derive(Serialize)]
struct ProductRecord<'a> {
    id: &'a Uuid,
    nom: &'a str,
    marque: &'a str,
    prix: f64,
    note: f64,
    nb_avis: u32,
    score_qualite_prix: f64,
    categorie_prix: PriceTier,
    caracteristiques: &'a [String],
    url: &'a str,
    source: &'a str,
    stock: bool,
    date_ajout: &'a DateTime<Utc>,
    extra: &'a Extras,
}

impl Serialize for Product {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ProductRecord {
            id: &self.id,
            nom: &self.name,
            marque: &self.brand,
            prix: self.price,
            note: self.rating,
            nb_avis: self.review_count,
            score_qualite_prix: self.quality_score,
            categorie_prix: self.price_tier(),
            caracteristiques: &self.features,
            url: &self.url,
            source: &self.source,
            stock: self.in_stock,
            date_ajout: &self.created_at,
            extra: &self.extra,
        }
        .serialize(serializer)
    }
}

impl Product {
    /// Validates the input and computes the quality score
    pub fn create(input: NewProduct) -> Result<Self, ProductError> {
        if input.name.trim().is_empty() {
            return Err(ProductError::EmptyName);
        }
        if !input.price.is_finite() || input.price < 0.0 {
            return Err(ProductError::InvalidPrice(input.price));
        }

        let quality_score = scoring::quality_score(
            input.rating,
            input.price,
            input.review_count,
            input.features.len(),
            reference_price_of(&input.extra),
        );

        Ok(Self {
            id: Uuid::new_v4(),
            name: input.name,
            brand: input.brand,
            price: input.price,
            rating: input.rating,
            review_count: input.review_count,
            features: input.features,
            url: input.url,
            source: input.source,
            in_stock: input.in_stock,
            created_at: input.created_at.unwrap_or_else(Utc::now),
            extra: input.extra,
            quality_score,
        })
    }

    /// Quality score in `[0, 100]`, as computed when the product was created
    pub fn quality_score(&self) -> f64 {
        self.quality_score
    }

    /// Price bracket for the current price
    pub fn price_tier(&self) -> PriceTier {
        PriceTier::for_price(self.price)
    }

    /// Reference price used to normalise the price component
    pub fn reference_price(&self) -> f64 {
        reference_price_of(&self.extra)
    }
}

/// Non-numeric or non-positive overrides fall back to the default anchor
fn reference_price_of(extra: &Extras) -> f64 {
    extra
        .get(REFERENCE_PRICE_KEY)
        .and_then(ExtraValue::as_f64)
        .filter(|reference| reference.is_finite() && *reference > 0.0)
        .unwrap_or(scoring::DEFAULT_REFERENCE_PRICE)
}

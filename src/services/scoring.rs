//! Quality score for a single product.
//!
//! The score is the sum of four independent components, capped at 100:
//!
//! | component  | max | rule                                               |
//! |------------|-----|----------------------------------------------------|
//! | rating     | 40  | `rating / 5 * 40` when the rating is positive      |
//! | price      | 30  | `max(0, 1 - price / reference) * 30` when price > 0 |
//! | popularity | 20  | step function over the review count                |
//! | features   | 10  | 2 points per feature tag                           |
//!
//! The weights are fixed; callers influence the price component only through
//! the reference price.

/// Typical price used when a product carries no `prix_reference` override
pub const DEFAULT_REFERENCE_PRICE: f64 = 500.0;

pub const RATING_WEIGHT: f64 = 40.0;
pub const PRICE_WEIGHT: f64 = 30.0;
pub const MAX_SCORE: f64 = 100.0;

/// Review-count thresholds and the points they earn, highest first
const POPULARITY_STEPS: [(u32, f64); 4] = [(200, 20.0), (100, 15.0), (50, 10.0), (10, 5.0)];

const POINTS_PER_FEATURE: f64 = 2.0;
const MAX_FEATURE_POINTS: f64 = 10.0;

/// Rating out of 5, not range-checked
pub fn rating_component(rating: f64) -> f64 {
    if rating > 0.0 {
        (rating / 5.0) * RATING_WEIGHT
    } else {
        0.0
    }
}

pub fn price_component(price: f64, reference_price: f64) -> f64 {
    if price > 0.0 {
        let ratio = (1.0 - price / reference_price).max(0.0);
        ratio * PRICE_WEIGHT
    } else {
        0.0
    }
}

/// Fewer than 10 reviews earn nothing
pub fn popularity_component(review_count: u32) -> f64 {
    POPULARITY_STEPS
        .iter()
        .find(|(threshold, _)| review_count >= *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(0.0)
}

pub fn feature_component(feature_count: usize) -> f64 {
    (feature_count as f64 * POINTS_PER_FEATURE).min(MAX_FEATURE_POINTS)
}

/// Combined score in `[0, 100]`
pub fn quality_score(
    rating: f64,
    price: f64,
    review_count: u32,
    feature_count: usize,
    reference_price: f64,
) -> f64 {
    let total = rating_component(rating)
        + price_component(price, reference_price)
        + popularity_component(review_count)
        + feature_component(feature_count);

    total.min(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_component() {
        assert_eq!(rating_component(5.0), 40.0);
        assert_eq!(rating_component(2.5), 20.0);
        assert_eq!(rating_component(0.0), 0.0);
        assert_eq!(rating_component(-1.0), 0.0);
        // Out-of-range ratings pass through uncapped
        assert_eq!(rating_component(10.0), 80.0);
    }

    #[test]
    fn test_price_component_boundaries() {
        assert_eq!(price_component(500.0, 500.0), 0.0);
        assert_eq!(price_component(800.0, 500.0), 0.0);
        assert_eq!(price_component(250.0, 500.0), 15.0);
        assert_eq!(price_component(50.0, 100.0), 15.0);
        // Non-positive prices are guarded
        assert_eq!(price_component(0.0, 500.0), 0.0);
        assert_eq!(price_component(-10.0, 500.0), 0.0);
    }

    #[test]
    fn test_price_component_near_zero_approaches_full_weight() {
        let component = price_component(0.0001, 500.0);
        assert!(component > 29.99 && component <= 30.0);
    }

    #[test]
    fn test_popularity_steps() {
        let cases = [
            (0, 0.0),
            (9, 0.0),
            (10, 5.0),
            (49, 5.0),
            (50, 10.0),
            (99, 10.0),
            (100, 15.0),
            (199, 15.0),
            (200, 20.0),
            (50_000, 20.0),
        ];
        for (reviews, expected) in cases {
            assert_eq!(popularity_component(reviews), expected, "reviews = {}", reviews);
        }
    }

    #[test]
    fn test_feature_component_caps_at_five_tags() {
        assert_eq!(feature_component(0), 0.0);
        assert_eq!(feature_component(3), 6.0);
        assert_eq!(feature_component(5), 10.0);
        assert_eq!(feature_component(12), 10.0);
    }

    #[test]
    fn test_expensive_top_rated_product_scores_seventy() {
        let score = quality_score(5.0, 10_000.0, 250, 6, DEFAULT_REFERENCE_PRICE);
        assert_eq!(score, 70.0);
    }

    #[test]
    fn test_score_is_capped_at_hundred() {
        // 80 (uncapped rating) + ~30 + 20 + 10
        let score = quality_score(10.0, 1.0, 500, 5, DEFAULT_REFERENCE_PRICE);
        assert_eq!(score, MAX_SCORE);
    }

    #[test]
    fn test_score_stays_in_range() {
        for rating in [0.0, 1.0, 3.5, 5.0] {
            for price in [0.0, 10.0, 499.0, 5000.0] {
                for reviews in [0, 10, 200] {
                    for features in [0, 2, 9] {
                        let score = quality_score(rating, price, reviews, features, 500.0);
                        assert!((0.0..=100.0).contains(&score));
                    }
                }
            }
        }
    }
}

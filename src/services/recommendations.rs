use crate::{
    models::{Product, Recommendation, RecommendationCriteria, SortCriterion},
    services::catalog::{brand_allowed, lowercase_all, rank, within_budget, ProductCatalog},
};

/// Produces a recommendation from the full catalog
///
/// Filters are applied in order (budget, brands, minimum rating), the
/// survivors are ranked by quality score and truncated to `top_n`. The
/// cheapest and highest-rated picks are taken from every surviving product,
/// not only from the truncated list, so they can differ from the top entry.
pub fn recommend<'a>(
    catalog: &'a ProductCatalog,
    criteria: &RecommendationCriteria,
) -> Recommendation<'a> {
    let allowed_brands = criteria
        .preferred_brands
        .as_deref()
        .filter(|brands| !brands.is_empty())
        .map(lowercase_all);

    let candidates: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| criteria.budget_max.map_or(true, |budget| within_budget(p, budget)))
        .filter(|p| {
            allowed_brands
                .as_ref()
                .map_or(true, |allowed| brand_allowed(p, allowed))
        })
        .filter(|p| p.rating >= criteria.min_rating)
        .collect();

    let cheapest = first_extreme(&candidates, |candidate, best| candidate.price < best.price);
    let highest_rated =
        first_extreme(&candidates, |candidate, best| candidate.rating > best.rating);

    let mut top = candidates.clone();
    rank(&mut top, SortCriterion::Score);
    top.truncate(criteria.top_n);

    tracing::debug!(
        category = catalog.category(),
        matching = candidates.len(),
        returned = top.len(),
        "Recommendation computed"
    );

    Recommendation {
        matching_count: candidates.len(),
        best: top.first().copied(),
        top,
        cheapest,
        highest_rated,
        criteria: criteria.clone(),
    }
}

/// The earliest product that nothing later strictly beats
fn first_extreme<'a, F>(products: &[&'a Product], beats: F) -> Option<&'a Product>
where
    F: Fn(&Product, &Product) -> bool,
{
    products
        .iter()
        .copied()
        .reduce(|best, candidate| if beats(candidate, best) { candidate } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewProduct;

    fn earphones() -> ProductCatalog {
        let mut catalog = ProductCatalog::new("earphones");
        catalog
            .add(NewProduct::new("AirPods Pro 2", "Apple", 279.0).rating(4.7).reviews(5000))
            .unwrap();
        catalog
            .add(NewProduct::new("WH-1000XM5", "Sony", 399.0).rating(4.8).reviews(3200))
            .unwrap();
        catalog
            .add(NewProduct::new("QuietComfort Ultra", "Bose", 429.0).rating(4.6).reviews(1800))
            .unwrap();
        catalog
            .add(NewProduct::new("Galaxy Buds2 Pro", "Samsung", 229.0).rating(4.5).reviews(2100))
            .unwrap();
        catalog
    }

    fn names(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_budget_excludes_low_rated_product_everywhere() {
        let mut catalog = ProductCatalog::new("misc");
        catalog
            .add(NewProduct::new("Product A", "Samsung", 299.0).rating(4.5).reviews(500))
            .unwrap();
        catalog.add(NewProduct::new("Product B", "LG", 399.0).rating(4.7).reviews(350)).unwrap();
        catalog.add(NewProduct::new("Product C", "Sony", 100.0).rating(3.0).reviews(200)).unwrap();

        let criteria = RecommendationCriteria::default().with_budget(400.0);
        let result = recommend(&catalog, &criteria);

        assert_eq!(result.matching_count, 2);
        assert!(result.top.iter().all(|p| p.name != "Product C"));
        assert_eq!(result.cheapest.unwrap().name, "Product A");
        assert_eq!(result.highest_rated.unwrap().name, "Product B");
        assert_ne!(result.best.unwrap().name, "Product C");
        assert_eq!(result.criteria.budget_max, Some(400.0));
    }

    #[test]
    fn test_ranked_by_score_and_truncated() {
        let catalog = earphones();
        let result = recommend(&catalog, &RecommendationCriteria::default().with_top_n(2));

        assert_eq!(result.matching_count, 4);
        assert_eq!(result.top.len(), 2);
        assert!(result.top[0].quality_score() >= result.top[1].quality_score());
        assert_eq!(result.best, Some(result.top[0]));
    }

    #[test]
    fn test_side_picks_use_whole_filtered_set() {
        let catalog = earphones();
        let result = recommend(&catalog, &RecommendationCriteria::default().with_top_n(1));

        assert_eq!(result.top.len(), 1);
        assert_eq!(result.cheapest.unwrap().name, "Galaxy Buds2 Pro");
        assert_eq!(result.highest_rated.unwrap().name, "WH-1000XM5");
    }

    #[test]
    fn test_brand_filter_ignores_case() {
        let catalog = earphones();
        let criteria = RecommendationCriteria::default().with_brands(["sony", "BOSE"]);
        let result = recommend(&catalog, &criteria);

        assert_eq!(result.matching_count, 2);
        let mut picked = names(&result.top);
        picked.sort();
        assert_eq!(picked, vec!["QuietComfort Ultra", "WH-1000XM5"]);
    }

    #[test]
    fn test_empty_brand_list_means_any_brand() {
        let catalog = earphones();
        let criteria = RecommendationCriteria::default().with_brands(Vec::<String>::new());
        assert_eq!(recommend(&catalog, &criteria).matching_count, 4);
    }

    #[test]
    fn test_default_min_rating_is_looser_than_filter() {
        let mut catalog = ProductCatalog::new("misc");
        catalog.add(NewProduct::new("Okay", "Acme", 50.0).rating(3.7)).unwrap();

        assert!(catalog.filter_by_min_rating(None).is_empty());
        assert_eq!(recommend(&catalog, &RecommendationCriteria::default()).matching_count, 1);
    }

    #[test]
    fn test_zero_budget_is_a_real_ceiling() {
        let mut catalog = earphones();
        catalog.add(NewProduct::new("Sample pack", "Acme", 0.0).rating(4.0)).unwrap();
        let result = recommend(&catalog, &RecommendationCriteria::default().with_budget(0.0));
        assert_eq!(result.matching_count, 1);
        assert_eq!(result.best.unwrap().name, "Sample pack");
    }

    #[test]
    fn test_nothing_matches() {
        let catalog = earphones();
        let result = recommend(&catalog, &RecommendationCriteria::default().with_budget(10.0));

        assert_eq!(result.matching_count, 0);
        assert!(result.top.is_empty());
        assert_eq!(result.best, None);
        assert_eq!(result.cheapest, None);
        assert_eq!(result.highest_rated, None);
    }

    #[test]
    fn test_ties_resolve_to_earliest_product() {
        let mut catalog = ProductCatalog::new("misc");
        catalog.add(NewProduct::new("First", "A", 100.0).rating(4.5)).unwrap();
        catalog.add(NewProduct::new("Second", "B", 100.0).rating(4.5)).unwrap();

        let result = recommend(&catalog, &RecommendationCriteria::default());
        assert_eq!(result.cheapest.unwrap().name, "First");
        assert_eq!(result.highest_rated.unwrap().name, "First");
        assert_eq!(result.best.unwrap().name, "First");
    }

    #[test]
    fn test_does_not_modify_catalog() {
        let catalog = earphones();
        let before: Vec<String> = catalog.products().iter().map(|p| p.name.clone()).collect();
        let _ = recommend(&catalog, &RecommendationCriteria::default());
        let after: Vec<String> = catalog.products().iter().map(|p| p.name.clone()).collect();
        assert_eq!(before, after);
    }
}

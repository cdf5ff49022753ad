use chrono::Utc;
use std::fmt::{self, Write};

use crate::{models::SortCriterion, services::catalog::ProductCatalog};

const RULE_WIDTH: usize = 80;
const FEATURES_SHOWN: usize = 3;

/// Human-readable analysis of the catalog
///
/// Lists summary figures, the `top_n` products by quality score (within the
/// budget when one is given) and the overall best choice.
pub fn render_report(catalog: &ProductCatalog, budget_max: Option<f64>, top_n: usize) -> String {
    let mut out = String::new();
    if let Err(e) = write_report(&mut out, catalog, budget_max, top_n) {
        tracing::error!(error = %e, "Failed to render analysis report");
    }
    out
}

fn write_report(
    out: &mut String,
    catalog: &ProductCatalog,
    budget_max: Option<f64>,
    top_n: usize,
) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    let stats = catalog.statistics();
    let top = catalog.top(top_n, budget_max, SortCriterion::Score);

    writeln!(out, "{}", rule)?;
    writeln!(out, "ANALYSIS REPORT - {}", catalog.category().to_uppercase())?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "Date: {}", Utc::now().format("%d/%m/%Y %H:%M"))?;
    writeln!(out, "Products analysed: {}", catalog.len())?;

    if let Some(budget) = budget_max {
        writeln!(out, "Budget: {:.2}", budget)?;
        writeln!(out, "Within budget: {}", catalog.filter_by_budget(budget).len())?;
    }

    if let Some(stats) = &stats {
        writeln!(out, "Average price: {:.2}", stats.average_price)?;
        writeln!(out, "Price range: {:.2} - {:.2}", stats.min_price, stats.max_price)?;
        writeln!(out, "Average rating: {:.1}/5", stats.average_rating.unwrap_or(0.0))?;
        writeln!(out, "Brands: {}", stats.brand_count)?;
    }

    writeln!(out, "{}", rule)?;
    writeln!(out, "TOP {} - BEST VALUE FOR MONEY", top.len())?;
    writeln!(out, "{}", rule)?;

    for (rank, product) in top.iter().enumerate() {
        writeln!(out, "{}. {} {}", rank + 1, product.brand, product.name)?;
        writeln!(out, "   {} - {:.2}", product.price_tier(), product.price)?;
        writeln!(out, "   Score: {:.1}/100", product.quality_score())?;
        writeln!(
            out,
            "   Rating: {}/5 ({} reviews)",
            product.rating, product.review_count
        )?;
        if !product.features.is_empty() {
            let shown: Vec<&str> = product
                .features
                .iter()
                .take(FEATURES_SHOWN)
                .map(String::as_str)
                .collect();
            writeln!(out, "   Features: {}", shown.join(", "))?;
        }
    }

    if let Some(best) = top.first() {
        writeln!(out, "{}", rule)?;
        writeln!(out, "RECOMMENDATION")?;
        writeln!(out, "{}", rule)?;
        writeln!(out, "Best choice: {} {}", best.brand, best.name)?;
        writeln!(
            out,
            "   Price: {:.2} | Score: {:.1}/100",
            best.price,
            best.quality_score()
        )?;
        writeln!(out, "   Rating: {}/5", best.rating)?;
    }

    writeln!(out, "{}", rule)
}

//! In-memory filtering and sorting of already-loaded catalog items.
//!
//! The storefront listing keeps the whole catalog client-side and applies
//! filter criteria locally; this mirrors that behavior so the SQL path and
//! the in-memory path agree.

use std::cmp::Ordering;

use crate::criteria::{FilterCriteria, SortBy, SortOrder};
use crate::text::{normalize, strip_accents, tokenize};

/// Read access the matcher needs from a catalog row.
pub trait CatalogItem {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn category(&self) -> &str;
    fn price(&self) -> f64;
    fn stock(&self) -> i32;
}

/// Apply the full criteria to a loaded catalog: every search token must
/// appear somewhere in the name, description or category, the remaining
/// filters narrow, and the result is sorted.
pub fn filter_and_sort<T: CatalogItem>(items: Vec<T>, criteria: &FilterCriteria) -> Vec<T> {
    let tokens = tokenize(&criteria.search);
    let category = strip_accents(&criteria.category);
    let min_price = criteria.min_price_value();
    let max_price = criteria.max_price_value();

    let mut kept: Vec<T> = items
        .into_iter()
        .filter(|item| {
            if !tokens.is_empty() {
                let haystack = normalize(&format!(
                    "{} {} {}",
                    item.name(),
                    item.description(),
                    item.category(),
                ));
                if !tokens.iter().all(|token| haystack.contains(token.as_str())) {
                    return false;
                }
            }
            if !category.is_empty() {
                let item_category = strip_accents(item.category());
                if item_category != category && !item_category.contains(&category) {
                    return false;
                }
            }
            if let Some(min) = min_price {
                if item.price() < min {
                    return false;
                }
            }
            if let Some(max) = max_price {
                if item.price() > max {
                    return false;
                }
            }
            if criteria.in_stock && item.stock() <= 0 {
                return false;
            }
            true
        })
        .collect();

    sort_items(&mut kept, criteria.sort_by, criteria.sort_order);
    kept
}

/// Stable sort by the requested key. Ties keep their incoming order.
pub fn sort_items<T: CatalogItem>(items: &mut [T], sort_by: SortBy, sort_order: SortOrder) {
    items.sort_by(|a, b| {
        let ordering = match sort_by {
            SortBy::Name => cmp_text(a.name(), b.name()),
            SortBy::Category => cmp_text(a.category(), b.category()),
            SortBy::Price => a.price().total_cmp(&b.price()),
            SortBy::Stock => a.stock().cmp(&b.stock()),
        };
        match sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

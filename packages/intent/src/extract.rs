//! Heuristic utterance-to-filter extraction.
//!
//! Turns a raw Spanish utterance into [`FilterCriteria`] without touching
//! the model. Used both as the fast path for obvious catalog requests and
//! as the fallback when the model answers without an action.

use lazy_static::lazy_static;
use regex::Regex;

use crate::criteria::{AssistantAction, FilterCriteria, SortBy, SortOrder};
use crate::rules::{
    detect_category, detect_material, has_intent_verb, has_stock_phrase, has_term, CategoryRule,
    COMMAND_WORDS, PRICE_WORDS,
};
use crate::text::normalize;

lazy_static! {
    // Price phrases run over the lowercased raw utterance, before accent
    // folding, so the accented spellings appear explicitly. A matching
    // range wins over the single-bound phrases even when both of its
    // numbers are missing.
    static ref PRICE_RANGE: Regex = Regex::new(
        r"(?:entre|de|rango|desde)\s*(?:\$?\s*(\d+))?\s*(?:a|hasta|y|al)\s*(?:\$?\s*(\d+))?"
    )
    .unwrap();
    static ref PRICE_MAX: Regex =
        Regex::new(r"(?:menos de|hasta|máximo|maximo|precio máximo)\s*\$?\s*(\d+)").unwrap();
    static ref PRICE_MIN: Regex =
        Regex::new(r"(?:más de|desde|mínimo|minimo|precio mínimo)\s*\$?\s*(\d+)").unwrap();
}

/// Ordered sort phrases; the first hit wins. Matched as plain substrings
/// of the normalized text so plural endings still hit.
const SORT_RULES: &[(&[&str], SortBy, SortOrder)] = &[
    (&["mas caro", "mayor precio", "precio alto"], SortBy::Price, SortOrder::Desc),
    (&["mas barato", "menor precio", "precio bajo"], SortBy::Price, SortOrder::Asc),
    (&["nuevo", "reciente"], SortBy::Stock, SortOrder::Desc),
];

/// Derive filter criteria from a raw utterance.
///
/// Returns `None` when the text carries no catalog intent at all: no
/// intent verb, no category term, no material term. Small talk must not
/// fabricate a filter.
pub fn infer_filter_criteria(utterance: &str) -> Option<FilterCriteria> {
    let trimmed = utterance.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_lowercase();
    let normalized = normalize(trimmed);

    let category = detect_category(&normalized);
    let material = detect_material(&normalized);
    if !has_intent_verb(&normalized) && category.is_none() && material.is_none() {
        return None;
    }

    let (min_price, max_price) = extract_price_bounds(&lower);
    let (sort_by, sort_order) = detect_sort(&normalized);

    Some(FilterCriteria {
        search: derive_search_text(&normalized, category, material),
        category: category.map(|rule| rule.canonical.to_string()).unwrap_or_default(),
        min_price,
        max_price,
        in_stock: has_stock_phrase(&normalized),
        sort_by,
        sort_order,
    })
}

/// [`infer_filter_criteria`] wrapped as the action the UI consumes.
pub fn infer_filter_action(utterance: &str) -> Option<AssistantAction> {
    infer_filter_criteria(utterance)
        .map(|filters| AssistantAction::ApplyFilters { filters, open_filters: true })
}

fn extract_price_bounds(lower: &str) -> (String, String) {
    if let Some(caps) = PRICE_RANGE.captures(lower) {
        let min = caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default();
        let max = caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();
        return (min, max);
    }
    let max = PRICE_MAX
        .captures(lower)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    let min = PRICE_MIN
        .captures(lower)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    (min, max)
}

fn detect_sort(normalized: &str) -> (SortBy, SortOrder) {
    for (phrases, sort_by, sort_order) in SORT_RULES {
        if phrases.iter().any(|phrase| normalized.contains(phrase)) {
            return (*sort_by, *sort_order);
        }
    }
    if normalized.contains("nombre") {
        let reversed = has_term(normalized, "z a") || has_term(normalized, "za");
        let order = if reversed { SortOrder::Desc } else { SortOrder::Asc };
        return (SortBy::Name, order);
    }
    (SortBy::Name, SortOrder::Asc)
}

/// Free search text: the normalized utterance minus category forms,
/// command vocabulary, price vocabulary and bare numbers. When nothing
/// survives, fall back to the category name, then the material keyword.
fn derive_search_text(
    normalized: &str,
    category: Option<&CategoryRule>,
    material: Option<&str>,
) -> String {
    let category_forms: &[&str] = category.map(|rule| rule.forms).unwrap_or(&[]);
    let kept: Vec<&str> = normalized
        .split_whitespace()
        .filter(|word| !word.chars().all(|ch| ch.is_ascii_digit()))
        .filter(|word| !category_forms.contains(word))
        .filter(|word| !COMMAND_WORDS.contains(word))
        .filter(|word| !PRICE_WORDS.contains(word))
        .collect();
    let search = kept.join(" ");

    if !search.is_empty() {
        return search;
    }
    if let Some(rule) = category {
        return rule.canonical.to_string();
    }
    if let Some(material) = material {
        return material.to_string();
    }
    String::new()
}

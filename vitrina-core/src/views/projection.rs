//! Pure derivations over a product list
//!
//! Nothing here touches engine state; every function is a function of its
//! arguments only.

use shared::{CategoryGroup, Product};

/// Case-insensitive substring match on the product name; an empty term matches
pub fn name_matches(product: &Product, term: &str) -> bool {
    term.is_empty() || product.name.to_lowercase().contains(&term.to_lowercase())
}

/// Products whose name contains `term`, in source order
pub fn filter_by_name(products: &[Product], term: &str) -> Vec<Product> {
    products
        .iter()
        .filter(|p| name_matches(p, term))
        .cloned()
        .collect()
}

/// Name filter ANDed with an exact category filter (empty = all)
pub fn filter_by_name_and_category(
    products: &[Product],
    term: &str,
    category: &str,
) -> Vec<Product> {
    products
        .iter()
        .filter(|p| name_matches(p, term))
        .filter(|p| category.is_empty() || p.category == category)
        .cloned()
        .collect()
}

/// Distinct categories present in `products`, first-seen order.
///
/// With a priority category, names equal to it ignoring case move to the
/// front; the rest keep their relative order.
pub fn distinct_categories(products: &[Product], priority: Option<&str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in products {
        if !seen.iter().any(|c| c == &product.category) {
            seen.push(product.category.clone());
        }
    }

    match priority {
        Some(priority) => {
            let priority = priority.to_lowercase();
            let (mut front, rest): (Vec<String>, Vec<String>) = seen
                .into_iter()
                .partition(|c| c.to_lowercase() == priority);
            front.extend(rest);
            front
        }
        None => seen,
    }
}

/// One group per category of `products`, each holding the `filtered`
/// products of that category
pub fn group_by_category(
    products: &[Product],
    filtered: &[Product],
    priority: Option<&str>,
) -> Vec<CategoryGroup> {
    distinct_categories(products, priority)
        .into_iter()
        .map(|category| {
            let items = filtered
                .iter()
                .filter(|p| p.category == category)
                .cloned()
                .collect();
            CategoryGroup { category, items }
        })
        .collect()
}

//! "More like this" selections for detail and listing pages.
//!
//! All selections keep dataset order unless stated otherwise.

use crate::dataset::Dataset;
use crate::types::{Author, Category, EntityId, Recipe};

/// Other recipes sharing the category or at least one tag, up to `limit`.
///
/// When nothing is related, falls back to the `limit` most recent other
/// recipes (newest first; equal timestamps keep dataset order).
pub fn related_recipes<'a>(dataset: &'a Dataset, current: &Recipe, limit: usize) -> Vec<&'a Recipe> {
    let others = move || dataset.recipes().iter().filter(move |r| r.id != current.id);

    let related: Vec<&Recipe> = others()
        .filter(|r| {
            r.category_id == current.category_id || r.tags.iter().any(|t| current.tags.contains(t))
        })
        .take(limit)
        .collect();
    if !related.is_empty() {
        return related;
    }

    let mut latest: Vec<&Recipe> = others().collect();
    latest.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    latest.truncate(limit);
    latest
}

/// Every other category, first `limit` in dataset order.
pub fn related_categories<'a>(dataset: &'a Dataset, current: &Category, limit: usize) -> Vec<&'a Category> {
    dataset
        .categories()
        .iter()
        .filter(|c| c.id != current.id)
        .take(limit)
        .collect()
}

/// Every other author, first `limit` in dataset order.
pub fn related_authors<'a>(dataset: &'a Dataset, current: &Author, limit: usize) -> Vec<&'a Author> {
    dataset
        .authors()
        .iter()
        .filter(|a| a.id != current.id)
        .take(limit)
        .collect()
}

/// Authors with at least one recipe in the category, in author-file order,
/// each with their recipe count within the category.
pub fn contributing_authors<'a>(dataset: &'a Dataset, category: &EntityId) -> Vec<(&'a Author, usize)> {
    dataset
        .authors()
        .iter()
        .filter_map(|author| {
            let count = dataset
                .recipes_in_category(category)
                .filter(|r| r.author_id == author.id)
                .count();
            (count > 0).then_some((author, count))
        })
        .collect()
}

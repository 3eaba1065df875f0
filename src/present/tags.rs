//! Tag frequency and the category tag cloud.

use crate::dataset::Dataset;
use crate::route::PageKind;
use crate::types::Category;
use serde::Serialize;
use std::collections::HashMap;
use url::form_urlencoded;

/// Tags with more occurrences than this are marked `large`.
pub const LARGE_TAG_THRESHOLD: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagWeight {
    pub tag: String,
    pub count: usize,
    pub large: bool,
}

/// Count tag occurrences, most frequent first, capped at `limit`.
///
/// Ties keep first-encounter order.
pub fn tag_weights<'a>(tags: impl IntoIterator<Item = &'a str>, limit: usize) -> Vec<TagWeight> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();
    for tag in tags {
        match position.get(tag) {
            Some(&i) => counts[i].1 += 1,
            None => {
                position.insert(tag, counts.len());
                counts.push((tag, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(tag, count)| TagWeight {
            tag: tag.to_string(),
            count,
            large: count > LARGE_TAG_THRESHOLD,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCloudEntry {
    pub tag: String,
    pub count: usize,
    pub large: bool,
    /// The category page filtered by a search for this tag.
    pub href: String,
    /// Hover text, e.g. `3 recipes`.
    pub title: String,
}

/// Tag cloud over every published recipe in `category`.
pub fn category_tag_cloud(dataset: &Dataset, category: &Category, limit: usize) -> Vec<TagCloudEntry> {
    let tags = dataset
        .recipes_in_category(&category.id)
        .flat_map(|r| r.tags.iter().map(String::as_str));
    tag_weights(tags, limit)
        .into_iter()
        .map(|weight| {
            let query: String = form_urlencoded::Serializer::new(String::new())
                .append_pair("slug", &category.slug)
                .append_pair("search", &weight.tag)
                .finish();
            TagCloudEntry {
                href: format!("{}?{query}", PageKind::Category.path()),
                title: super::count_label(weight.count, "recipe"),
                tag: weight.tag,
                count: weight.count,
                large: weight.large,
            }
        })
        .collect()
}

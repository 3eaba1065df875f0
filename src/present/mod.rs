//! Render models: query results and entities turned into display records.
//!
//! Nothing in here produces markup. Every function takes the dataset, the
//! display limits from [`DisplayConfig`], and an explicit `now`, and returns
//! plain serializable structs that [`crate::render`] turns into HTML (or the
//! CLI prints as JSON).
//!
//! | Module | Produces |
//! |--------|----------|
//! | [`cards`] | recipe, category and author cards |
//! | [`dates`] | relative date labels |
//! | [`detail`] | the recipe detail view |
//! | [`related`] | related recipes, categories, authors |
//! | [`tags`] | tag frequency and the category tag cloud |
//! | [`listing`] | a listing page: cards, pagination, filter chips |
//! | [`page`] | one model per page kind, site chrome, error state |

pub mod cards;
pub mod dates;
pub mod detail;
pub mod listing;
pub mod page;
pub mod related;
pub mod tags;

use crate::config::DisplayConfig;
use crate::dataset::Dataset;
use chrono::{DateTime, Utc};

/// Everything the synthesizer reads. Cheap to copy.
#[derive(Debug, Clone, Copy)]
pub struct PresentContext<'a> {
    pub dataset: &'a Dataset,
    pub display: &'a DisplayConfig,
    /// Reference time for relative date labels.
    pub now: DateTime<Utc>,
}

impl<'a> PresentContext<'a> {
    pub fn new(dataset: &'a Dataset, display: &'a DisplayConfig, now: DateTime<Utc>) -> Self {
        Self {
            dataset,
            display,
            now,
        }
    }
}

/// Cut `text` to `max` characters, trim, and append `...`.
///
/// Text within the limit is returned unchanged.
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut.trim())
}

/// `"1 recipe"`, `"3 recipes"`, `"0 recipes"`.
pub fn count_label(count: usize, singular: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {singular}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_within_limit_is_untouched() {
        assert_eq!(truncate_text("short bio", 100), "short bio");
        assert_eq!(truncate_text("", 10), "");
        assert_eq!(truncate_text("exactly", 7), "exactly");
    }

    #[test]
    fn truncate_cuts_trims_and_appends_ellipsis() {
        assert_eq!(truncate_text("Line cook, weekend baker.", 11), "Line cook,...");
        // Cut lands right after a space
        assert_eq!(truncate_text("one two three", 4), "one...");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_text("crème brûlée", 5), "crème...");
    }

    #[test]
    fn count_label_pluralizes() {
        assert_eq!(count_label(0, "recipe"), "0 recipes");
        assert_eq!(count_label(1, "recipe"), "1 recipe");
        assert_eq!(count_label(12, "author"), "12 authors");
    }
}

//! CLI output formatting.
//!
//! # Display Contract
//!
//! Every entity prints as a header line (positional index + name, with a
//! count where one applies) followed by indented context lines. Positions
//! are 1-based and zero-padded to three digits so columns line up.
//!
//! ## Check
//!
//! ```text
//! Saffron & Salt
//!     6 recipes, 4 categories, 4 authors
//!     4 per page
//!
//! Categories
//! 001 Desserts (3 recipes)
//!     Slug: desserts
//!
//! Authors
//! 001 Ana Lima (2 recipes)
//!     Slug: ana-lima
//!
//! References
//!     All category and author references resolve
//! ```
//!
//! ## Query
//!
//! ```text
//! 2 matches, page 1 of 1 (12 per page)
//! 001 Chocolate Cake
//!     Slug: chocolate-cake
//!     medium, 2024-03-01
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::dataset::{Dataset, ReferenceKind};
use crate::present::{count_label, truncate_text};
use crate::query::QueryResult;
use crate::seo::{SeoMeta, StructuredData};
use crate::view_state::ViewState;

/// Longest description shown inline before it is cut.
const DESCRIPTION_CHARS: usize = 60;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `count_label` for nouns with an irregular plural.
fn counted(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Positional index + name, with an optional recipe count.
///
/// ```text
/// 001 Desserts (3 recipes)
/// 002 Drinks (0 recipes)
/// ```
fn entity_header(index: usize, name: &str, count: Option<usize>) -> String {
    match count {
        Some(n) => format!("{} {} ({})", format_index(index), name, count_label(n, "recipe")),
        None => format!("{} {}", format_index(index), name),
    }
}

// ============================================================================
// Check
// ============================================================================

/// Inventory of a loaded dataset.
pub fn format_check_output(dataset: &Dataset) -> Vec<String> {
    let mut lines = Vec::new();
    let site = dataset.site();

    lines.push(site.site_name.clone());
    lines.push(format!(
        "{}{}, {}, {}",
        indent(1),
        count_label(dataset.recipes().len(), "recipe"),
        counted(dataset.categories().len(), "category", "categories"),
        count_label(dataset.authors().len(), "author"),
    ));
    lines.push(format!("{}{} per page", indent(1), site.page_size()));

    lines.push(String::new());
    lines.push("Categories".to_string());
    for (i, category) in dataset.categories().iter().enumerate() {
        let count = dataset.recipes_in_category(&category.id).count();
        lines.push(entity_header(i + 1, &category.title, Some(count)));
        lines.push(format!("{}Slug: {}", indent(1), category.slug));
        if !category.description.is_empty() {
            lines.push(format!(
                "{}Description: {}",
                indent(1),
                truncate_text(&category.description, DESCRIPTION_CHARS)
            ));
        }
    }

    lines.push(String::new());
    lines.push("Authors".to_string());
    for (i, author) in dataset.authors().iter().enumerate() {
        let count = dataset.recipes_by_author(&author.id).count();
        lines.push(entity_header(i + 1, &author.name, Some(count)));
        lines.push(format!("{}Slug: {}", indent(1), author.slug));
    }

    lines.push(String::new());
    lines.push("References".to_string());
    let dangling = dataset.dangling_references();
    if dangling.is_empty() {
        lines.push(format!(
            "{}All category and author references resolve",
            indent(1)
        ));
    } else {
        for reference in &dangling {
            let kind = match reference.kind {
                ReferenceKind::Category => "category",
                ReferenceKind::Author => "author",
            };
            lines.push(format!(
                "{}{} → unknown {} {}",
                indent(1),
                reference.recipe_slug,
                kind,
                reference.id
            ));
        }
    }

    lines
}

pub fn print_check_output(dataset: &Dataset) {
    for line in format_check_output(dataset) {
        println!("{}", line);
    }
}

// ============================================================================
// Query
// ============================================================================

/// One page of results, numbered by overall rank.
pub fn format_query_output(result: &QueryResult<'_>, state: &ViewState) -> Vec<String> {
    let mut lines = Vec::new();

    let mut filters: Vec<String> = Vec::new();
    if !state.search.is_empty() {
        filters.push(format!("search \"{}\"", state.search));
    }
    for (key, value) in state.active_filters() {
        filters.push(format!("{key} {value}"));
    }
    if !filters.is_empty() {
        lines.push(format!("Filters: {}", filters.join(", ")));
    }
    lines.push(format!("Sort: {}", state.sort.as_str()));

    if result.is_empty() {
        lines.push("No recipes found".to_string());
        return lines;
    }

    lines.push(format!(
        "{}, page {} of {} ({} per page)",
        counted(result.total_matches, "match", "matches"),
        result.page,
        result.total_pages,
        result.page_size
    ));

    if result.is_past_end() {
        lines.push(format!(
            "{}Page {} is past the last page",
            indent(1),
            result.page
        ));
        return lines;
    }

    let offset = (result.page.max(1) as usize - 1) * result.page_size;
    for (i, recipe) in result.items.iter().enumerate() {
        lines.push(entity_header(offset + i + 1, &recipe.title, None));
        lines.push(format!("{}Slug: {}", indent(1), recipe.slug));
        lines.push(format!(
            "{}{}, {}",
            indent(1),
            recipe.difficulty.as_str(),
            recipe.created_at.format("%Y-%m-%d")
        ));
    }

    lines
}

pub fn print_query_output(result: &QueryResult<'_>, state: &ViewState) {
    for line in format_query_output(result, state) {
        println!("{}", line);
    }
}

// ============================================================================
// SEO
// ============================================================================

/// Meta tags followed by the pretty-printed JSON-LD payload, if any.
pub fn format_seo_output(seo: &SeoMeta, structured: Option<&StructuredData>) -> Vec<String> {
    let mut lines = vec![
        format!("Title: {}", seo.title),
        format!("Description: {}", seo.description),
        format!("Image: {}", seo.image.as_deref().unwrap_or("(none)")),
        format!("Canonical: {}", seo.canonical_url),
    ];

    lines.push(String::new());
    match structured {
        Some(data) => {
            lines.push(format!("Structured data ({})", data.schema_type()));
            match data.to_json() {
                Ok(json) => lines.extend(json.lines().map(str::to_string)),
                Err(e) => lines.push(format!("{}(unserializable: {e})", indent(1))),
            }
        }
        None => lines.push("Structured data: none".to_string()),
    }

    lines
}

pub fn print_seo_output(seo: &SeoMeta, structured: Option<&StructuredData>) {
    for line in format_seo_output(seo, structured) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::query;
    use crate::route::RouteResolver;
    use crate::test_helpers::*;
    use crate::types::EntityId;

    #[test]
    fn format_index_single_digit() {
        assert_eq!(format_index(1), "001");
    }

    #[test]
    fn format_index_triple_digit() {
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn entity_header_with_count() {
        assert_eq!(entity_header(1, "Desserts", Some(3)), "001 Desserts (3 recipes)");
        assert_eq!(entity_header(2, "Drinks", Some(1)), "002 Drinks (1 recipe)");
        assert_eq!(entity_header(12, "Cake", None), "012 Cake");
    }

    #[test]
    fn check_output_inventory() {
        let data = fixture_dataset();
        let lines = format_check_output(&data);
        assert_eq!(lines[0], "Saffron & Salt");
        assert_eq!(lines[1], "    6 recipes, 4 categories, 4 authors");
        assert_eq!(lines[2], "    4 per page");
        assert!(lines.contains(&"001 Desserts (3 recipes)".to_string()));
        assert!(lines.contains(&"004 Drinks (0 recipes)".to_string()));
        assert!(lines.contains(&"001 Ana Lima (2 recipes)".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "    All category and author references resolve"
        );
    }

    #[test]
    fn check_output_lists_dangling_references() {
        let mut orphan = recipe("1", "Orphan Stew");
        orphan.category_id = EntityId::from("gone");
        let data = dataset(vec![orphan], vec![], vec![author("a1", "Ana")]);
        let lines = format_check_output(&data);
        assert_eq!(lines.last().unwrap(), "    orphan-stew → unknown category gone");
    }

    #[test]
    fn query_output_numbers_by_rank() {
        let data = fixture_dataset();
        let state = RouteResolver::default().resolve_url("/?page=2").state;
        let result = query(&data, &state);
        let lines = format_query_output(&result, &state);
        assert_eq!(lines[0], "Sort: newest");
        assert_eq!(lines[1], "6 matches, page 2 of 2 (4 per page)");
        assert_eq!(lines[2], "005 Mushroom Risotto");
        assert_eq!(lines[3], "    Slug: mushroom-risotto");
        assert_eq!(lines[4], "    medium, 2024-01-20");
    }

    #[test]
    fn query_output_no_results() {
        let data = fixture_dataset();
        let state = RouteResolver::default()
            .resolve_url("/?search=zzz&difficulty=hard")
            .state;
        let result = query(&data, &state);
        let lines = format_query_output(&result, &state);
        assert_eq!(lines[0], "Filters: search \"zzz\", difficulty hard");
        assert_eq!(lines.last().unwrap(), "No recipes found");
    }

    #[test]
    fn query_output_past_end() {
        let data = fixture_dataset();
        let state = RouteResolver::default().resolve_url("/?page=7").state;
        let result = query(&data, &state);
        let lines = format_query_output(&result, &state);
        assert_eq!(lines.last().unwrap(), "    Page 7 is past the last page");
    }

    #[test]
    fn seo_output_without_structured_data() {
        let seo = SeoMeta {
            title: "Kitchen".into(),
            description: "Home".into(),
            image: None,
            canonical_url: "https://x.test/".into(),
        };
        let lines = format_seo_output(&seo, None);
        assert_eq!(lines[2], "Image: (none)");
        assert_eq!(lines.last().unwrap(), "Structured data: none");
    }
}

//! The query engine: dataset + view state → one page of recipes.
//!
//! A pure function of its inputs. The pipeline runs in a fixed order:
//!
//! ```text
//! published recipes (dataset order)
//!   → text filter       search term in title / excerpt / ingredients / tags
//!   → scope filter      category or author from the route
//!   → attribute filters one pass per active FilterKey
//!   → stable sort       newest | oldest | alphabetical | category | popular
//!   → paginate          slice by the site's items-per-page
//! ```
//!
//! Every stage is an O(n) scan; datasets are small enough that no index is
//! kept. An empty result is a normal outcome, never an error.

use crate::dataset::Dataset;
use crate::types::Recipe;
use crate::view_state::{FilterKey, Scope, SortKey, ViewState};
use std::cmp::Ordering;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// One page of a query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<'a> {
    /// Recipes on the requested page, in sort order.
    pub items: Vec<&'a Recipe>,
    /// Matches across all pages.
    pub total_matches: usize,
    /// `ceil(total_matches / page_size)`; 0 when nothing matches.
    pub total_pages: usize,
    /// The requested page, unclamped.
    pub page: u32,
    pub page_size: usize,
}

impl QueryResult<'_> {
    /// No recipe matched the filters (distinct from an out-of-range page).
    pub fn is_empty(&self) -> bool {
        self.total_matches == 0
    }

    /// Matches exist but the requested page is past the last one.
    pub fn is_past_end(&self) -> bool {
        !self.is_empty() && self.page as usize > self.total_pages
    }
}

/// Run the full pipeline and return the page selected by `state.page`.
pub fn query<'a>(dataset: &'a Dataset, state: &ViewState) -> QueryResult<'a> {
    let matches = matching_recipes(dataset, state);
    let page_size = dataset.site().page_size();
    let total_matches = matches.len();
    let items = page_slice(&matches, state.page, page_size).to_vec();
    debug!(
        search = %state.search,
        sort = state.sort.as_str(),
        page = state.page,
        total_matches,
        shown = items.len(),
        "query"
    );
    QueryResult {
        items,
        total_matches,
        total_pages: total_pages(total_matches, page_size),
        page: state.page,
        page_size,
    }
}

/// Filter and sort without paginating.
pub fn matching_recipes<'a>(dataset: &'a Dataset, state: &ViewState) -> Vec<&'a Recipe> {
    let needle = state.search.to_lowercase();
    let mut recipes: Vec<&Recipe> = dataset
        .recipes()
        .iter()
        .filter(|r| needle.is_empty() || matches_search(r, &needle))
        .filter(|r| matches_scope(r, &state.scope))
        .collect();

    for (key, value) in state.active_filters() {
        recipes.retain(|r| recipe_attribute(r, key) == value);
    }

    sort_recipes(&mut recipes, state.sort, dataset);
    recipes
}

/// Case-insensitive substring match. `needle` must already be lowercase.
fn matches_search(recipe: &Recipe, needle: &str) -> bool {
    let hit = |field: &str| field.to_lowercase().contains(needle);
    hit(&recipe.title)
        || hit(&recipe.excerpt)
        || recipe.ingredients.iter().any(|i| hit(i.as_str()))
        || recipe.tags.iter().any(|t| hit(t.as_str()))
}

fn matches_scope(recipe: &Recipe, scope: &Scope) -> bool {
    match scope {
        Scope::None => true,
        Scope::Category(id) => &recipe.category_id == id,
        Scope::Author(id) => &recipe.author_id == id,
    }
}

/// The value a recipe exposes for an attribute filter.
pub fn recipe_attribute(recipe: &Recipe, key: FilterKey) -> &str {
    match key {
        FilterKey::Difficulty => recipe.difficulty.as_str(),
    }
}

/// Stable in-place sort.
pub fn sort_recipes(recipes: &mut [&Recipe], sort: SortKey, dataset: &Dataset) {
    match sort {
        SortKey::Newest => recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Oldest => recipes.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::Alphabetical => recipes.sort_by(|a, b| locale_cmp(&a.title, &b.title)),
        SortKey::Category => {
            // Resolve each title once; a missing category sorts as "".
            let mut keyed: Vec<(&str, &Recipe)> = recipes
                .iter()
                .map(|r| {
                    let title = dataset
                        .category(&r.category_id)
                        .map_or("", |c| c.title.as_str());
                    (title, *r)
                })
                .collect();
            keyed.sort_by(|a, b| locale_cmp(a.0, b.0));
            for (slot, (_, recipe)) in recipes.iter_mut().zip(keyed) {
                *slot = recipe;
            }
        }
        SortKey::Popular => {
            recipes.sort_by(|a, b| b.title.chars().count().cmp(&a.title.chars().count()))
        }
    }
}

/// Human-order string comparison, close to a root-locale collation.
///
/// Three levels, each consulted only when the previous one ties:
///
/// 1. base letters: case and diacritics ignored, ligatures expanded
///    (`Éclair` sorts with `eclair`, `Œufs` with `oeufs`)
/// 2. accents: unaccented before accented (`cote` < `côte`)
/// 3. case: lowercase before uppercase
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_key(a)
        .cmp(&base_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
}

fn base_key(s: &str) -> Vec<char> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .flat_map(|c| {
            let (expanded, len) = match c {
                'œ' => (['o', 'e'], 2),
                'æ' => (['a', 'e'], 2),
                'ß' => (['s', 's'], 2),
                'ø' => (['o', 'o'], 1),
                other => ([other, other], 1),
            };
            expanded.into_iter().take(len)
        })
        .collect()
}

fn accent_key(s: &str) -> Vec<char> {
    s.nfd().flat_map(char::to_lowercase).collect()
}

/// `ceil(matches / page_size)`, 0 for no matches.
pub fn total_pages(matches: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    matches.div_ceil(page_size)
}

/// The 1-based `page` of `items`. Out-of-range pages are empty.
pub fn page_slice<T>(items: &[T], page: u32, page_size: usize) -> &[T] {
    let page = page.max(1) as usize;
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

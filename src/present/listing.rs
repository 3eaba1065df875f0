//! A listing page: the recipe cards for one query plus the controls around
//! them (pagination, active filter chips, form values).
//!
//! ## Pagination
//!
//! Hidden when there is at most one page. Otherwise a window of two pages
//! either side of the current one, with the first and last page always
//! reachable and a gap marker where the window does not touch them:
//!
//! ```text
//! page 1 of 10   [1] 2 3 … 10  Next
//! page 5 of 10   Prev 1 … 3 4 [5] 6 7 … 10  Next
//! page 10 of 10  Prev 1 … 8 9 [10]
//! ```
//!
//! A cursor past the last page keeps the window at the last page with no
//! page marked current; "previous" then leads to the last page.

use super::PresentContext;
use super::cards::{RecipeCard, recipe_card};
use crate::query::QueryResult;
use crate::view_state::{Action, SortKey, ViewMode, ViewState};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PageSlot {
    Page { number: u32, current: bool },
    Gap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationModel {
    pub current: u32,
    pub total_pages: u32,
    pub previous: Option<u32>,
    pub next: Option<u32>,
    pub slots: Vec<PageSlot>,
}

/// Pages either side of the current one.
const WINDOW: u32 = 2;

/// Controls for `current` of `total_pages`. `None` when there is nothing to page.
pub fn pagination(current: u32, total_pages: usize) -> Option<PaginationModel> {
    let total = u32::try_from(total_pages).unwrap_or(u32::MAX);
    if total <= 1 {
        return None;
    }
    let current = current.max(1);
    let anchor = current.min(total);

    let start = anchor.saturating_sub(WINDOW).max(1);
    let end = anchor.saturating_add(WINDOW).min(total);

    let mut slots = Vec::new();
    if start > 1 {
        slots.push(PageSlot::Page {
            number: 1,
            current: current == 1,
        });
        if start > 2 {
            slots.push(PageSlot::Gap);
        }
    }
    for number in start..=end {
        slots.push(PageSlot::Page {
            number,
            current: number == current,
        });
    }
    if end < total {
        if end < total - 1 {
            slots.push(PageSlot::Gap);
        }
        slots.push(PageSlot::Page {
            number: total,
            current: false,
        });
    }

    Some(PaginationModel {
        current,
        total_pages: total,
        previous: (current > 1).then(|| (current - 1).min(total)),
        next: (current < total).then_some(current + 1),
        slots,
    })
}

/// An active search or filter, with the action that removes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterChip {
    pub label: String,
    pub remove: Action,
}

/// Search chip first, then one chip per non-empty filter in key order.
pub fn filter_chips(state: &ViewState) -> Vec<FilterChip> {
    let mut chips = Vec::new();
    if !state.search.is_empty() {
        chips.push(FilterChip {
            label: format!("Search: \"{}\"", state.search),
            remove: Action::ClearSearch,
        });
    }
    for (key, value) in state.active_filters() {
        chips.push(FilterChip {
            label: format!("{key}: {value}"),
            remove: Action::RemoveFilter(key),
        });
    }
    chips
}

/// Current form values, so the controls can be synced with the view state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingControls {
    pub search: String,
    pub sort: SortKey,
    pub difficulty: Option<String>,
    pub view: ViewMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub view_mode: ViewMode,
    pub cards: Vec<RecipeCard>,
    /// Nothing matched the filters. An out-of-range page is not "no results".
    pub no_results: bool,
    pub total_matches: usize,
    pub pagination: Option<PaginationModel>,
    pub chips: Vec<FilterChip>,
    pub controls: ListingControls,
}

pub fn listing(ctx: &PresentContext<'_>, state: &ViewState, result: &QueryResult<'_>) -> Listing {
    let no_results = result.is_empty();
    Listing {
        view_mode: state.view,
        cards: result.items.iter().map(|r| recipe_card(ctx, r)).collect(),
        no_results,
        total_matches: result.total_matches,
        pagination: if no_results {
            None
        } else {
            pagination(result.page, result.total_pages)
        },
        chips: filter_chips(state),
        controls: ListingControls {
            search: state.search.clone(),
            sort: state.sort,
            difficulty: state
                .filter(crate::view_state::FilterKey::Difficulty)
                .map(str::to_string),
            view: state.view,
        },
    }
}

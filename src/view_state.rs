//! View state and its transitions.
//!
//! [`ViewState`] is the single source of truth for what a listing shows:
//! search term, sort order, attribute filters, page cursor, view mode, and
//! the route-derived scope. It is built from URL parameters when a page is
//! entered, changed only through [`Action`]s, and written back to the URL
//! after every change with defaults omitted.
//!
//! ## URL Parameters
//!
//! ```text
//! search=choc            # free-text search (trimmed)
//! sort=oldest            # newest | oldest | alphabetical | category | popular
//! page=2                 # 1-based page cursor
//! view=list              # grid | list
//! difficulty=hard        # one parameter per filter key
//! ```
//!
//! Parsing never fails: unknown parameters are ignored and malformed values
//! fall back to their defaults.

use crate::types::EntityId;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use url::form_urlencoded;

/// Listing sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Alphabetical,
    Category,
    /// Title length, longest first. A stand-in until real popularity data exists.
    Popular,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Newest,
        SortKey::Oldest,
        SortKey::Alphabetical,
        SortKey::Category,
        SortKey::Popular,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Alphabetical => "alphabetical",
            Self::Category => "category",
            Self::Popular => "popular",
        }
    }

    /// Exact, case-sensitive match against the URL values.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == value)
    }
}

/// Listing layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "grid" => Some(Self::Grid),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

/// A user-selectable attribute filter.
///
/// Each key owns one URL parameter. Adding a key means adding a variant
/// here and its attribute accessor in [`crate::query::recipe_attribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKey {
    Difficulty,
}

impl FilterKey {
    pub const ALL: [FilterKey; 1] = [FilterKey::Difficulty];

    /// URL parameter name, also used as the chip label.
    pub fn param(self) -> &'static str {
        match self {
            Self::Difficulty => "difficulty",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

/// Route-derived restriction on the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum Scope {
    #[default]
    None,
    Category(EntityId),
    Author(EntityId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub search: String,
    pub sort: SortKey,
    /// Active attribute filters. Empty values are never stored.
    pub filters: BTreeMap<FilterKey, String>,
    /// 1-based page cursor.
    pub page: u32,
    pub view: ViewMode,
    pub scope: Scope,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: SortKey::default(),
            filters: BTreeMap::new(),
            page: 1,
            view: ViewMode::default(),
            scope: Scope::None,
        }
    }
}

/// A state-changing UI event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Action {
    /// Search submitted (button, enter key, or a debounced keystroke).
    SubmitSearch(String),
    ClearSearch,
    SetSort(SortKey),
    /// An empty value removes the filter.
    SetFilter(FilterKey, String),
    RemoveFilter(FilterKey),
    GoToPage(u32),
    SetViewMode(ViewMode),
    /// Resets search, filters and page. Sort and view mode are kept.
    ClearFilters,
}

impl Action {
    /// Whether applying this action sends the user back to page 1.
    pub fn resets_page(&self) -> bool {
        !matches!(self, Action::GoToPage(_) | Action::SetViewMode(_))
    }
}

impl ViewState {
    /// Parse the view state from a query string (with or without leading `?`).
    ///
    /// When a parameter repeats, the first occurrence wins.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params: BTreeMap<String, String> = BTreeMap::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            params.entry(key.into_owned()).or_insert_with(|| value.into_owned());
        }

        let mut state = Self::default();
        if let Some(search) = params.get("search") {
            state.search = search.trim().to_string();
        }
        if let Some(sort) = params.get("sort").and_then(|s| SortKey::parse(s)) {
            state.sort = sort;
        }
        state.page = params.get("page").map_or(1, |p| parse_page(p));
        if let Some(view) = params.get("view").and_then(|v| ViewMode::parse(v)) {
            state.view = view;
        }
        for key in FilterKey::ALL {
            if let Some(value) = params.get(key.param()) {
                state.set_filter(key, value);
            }
        }
        state
    }

    /// Non-default parameters in canonical order: search, sort, page, view, filters.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        if self.sort != SortKey::default() {
            pairs.push(("sort", self.sort.as_str().to_string()));
        }
        if self.page > 1 {
            pairs.push(("page", self.page.to_string()));
        }
        if self.view != ViewMode::default() {
            pairs.push(("view", self.view.as_str().to_string()));
        }
        for (key, value) in self.active_filters() {
            pairs.push((key.param(), value.to_string()));
        }
        pairs
    }

    /// Form-urlencoded query string without the leading `?`. Empty when
    /// every field is at its default.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.query_pairs() {
            serializer.append_pair(key, &value);
        }
        serializer.finish()
    }

    /// Filters with a non-empty value, in key order.
    pub fn active_filters(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.filters
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (*key, value.as_str()))
    }

    pub fn filter(&self, key: FilterKey) -> Option<&str> {
        self.filters.get(&key).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Whether a search term or any attribute filter is active.
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty() || self.active_filters().next().is_some()
    }

    fn set_filter(&mut self, key: FilterKey, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.filters.remove(&key);
        } else {
            self.filters.insert(key, value.to_string());
        }
    }

    /// Apply one transition. Page resets to 1 unless the action is page
    /// navigation or a view-mode toggle.
    pub fn apply(&mut self, action: Action) {
        let resets_page = action.resets_page();
        match action {
            Action::SubmitSearch(term) => self.search = term.trim().to_string(),
            Action::ClearSearch => self.search.clear(),
            Action::SetSort(sort) => self.sort = sort,
            Action::SetFilter(key, value) => self.set_filter(key, &value),
            Action::RemoveFilter(key) => {
                self.filters.remove(&key);
            }
            Action::GoToPage(page) => self.page = page.max(1),
            Action::SetViewMode(view) => self.view = view,
            Action::ClearFilters => {
                self.search.clear();
                self.filters.clear();
            }
        }
        if resets_page {
            self.page = 1;
        }
    }
}

/// Strict positive integer, else 1.
fn parse_page(raw: &str) -> u32 {
    raw.trim().parse::<u32>().ok().filter(|p| *p >= 1).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hard() -> Action {
        Action::SetFilter(FilterKey::Difficulty, "hard".to_string())
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    #[test]
    fn empty_query_is_default() {
        assert_eq!(ViewState::from_query(""), ViewState::default());
        assert_eq!(ViewState::from_query("?"), ViewState::default());
    }

    #[test]
    fn parses_all_known_parameters() {
        let state =
            ViewState::from_query("?search=choc+cake&sort=oldest&page=3&view=list&difficulty=hard");
        assert_eq!(state.search, "choc cake");
        assert_eq!(state.sort, SortKey::Oldest);
        assert_eq!(state.page, 3);
        assert_eq!(state.view, ViewMode::List);
        assert_eq!(state.filter(FilterKey::Difficulty), Some("hard"));
    }

    #[test]
    fn invalid_sort_falls_back_to_newest() {
        assert_eq!(ViewState::from_query("sort=random").sort, SortKey::Newest);
        assert_eq!(ViewState::from_query("sort=Oldest").sort, SortKey::Newest);
    }

    #[test]
    fn malformed_page_falls_back_to_one() {
        for raw in ["page=0", "page=-2", "page=abc", "page=2abc", "page=", "page=99999999999"] {
            assert_eq!(ViewState::from_query(raw).page, 1, "{raw}");
        }
        assert_eq!(ViewState::from_query("page=%202").page, 2);
    }

    #[test]
    fn invalid_view_falls_back_to_grid() {
        assert_eq!(ViewState::from_query("view=table").view, ViewMode::Grid);
    }

    #[test]
    fn empty_difficulty_not_inserted() {
        let state = ViewState::from_query("difficulty=");
        assert!(state.filters.is_empty());
        assert!(!state.has_active_filters());
    }

    #[test]
    fn unknown_parameters_ignored() {
        let state = ViewState::from_query("utm_source=news&slug=cake&cuisine=thai");
        assert_eq!(state, ViewState::default());
    }

    #[test]
    fn first_repeated_parameter_wins() {
        let state = ViewState::from_query("sort=oldest&sort=popular");
        assert_eq!(state.sort, SortKey::Oldest);
    }

    #[test]
    fn percent_encoded_search_decoded() {
        let state = ViewState::from_query("search=cr%C3%A8me%20br%C3%BBl%C3%A9e");
        assert_eq!(state.search, "crème brûlée");
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    #[test]
    fn default_state_serializes_empty() {
        assert_eq!(ViewState::default().to_query(), "");
    }

    #[test]
    fn serializes_in_canonical_order_omitting_defaults() {
        let mut state = ViewState::default();
        state.apply(hard());
        state.apply(Action::SubmitSearch("lemon tart".into()));
        state.apply(Action::SetViewMode(ViewMode::List));
        state.apply(Action::GoToPage(2));
        assert_eq!(state.to_query(), "search=lemon+tart&page=2&view=list&difficulty=hard");
    }

    #[test]
    fn round_trip_through_url() {
        let mut state = ViewState::default();
        state.apply(Action::SetSort(SortKey::Alphabetical));
        state.apply(hard());
        state.apply(Action::SubmitSearch("  crème & co ".into()));
        state.apply(Action::SetViewMode(ViewMode::List));
        state.apply(Action::GoToPage(4));

        let parsed = ViewState::from_query(&state.to_query());
        assert_eq!(parsed, state);
    }

    #[test]
    fn round_trip_every_sort_key() {
        for sort in SortKey::ALL {
            let state = ViewState {
                sort,
                ..ViewState::default()
            };
            assert_eq!(ViewState::from_query(&state.to_query()).sort, sort);
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn on_page_three() -> ViewState {
        ViewState {
            page: 3,
            ..ViewState::default()
        }
    }

    #[test]
    fn filtering_actions_reset_page() {
        let actions = [
            Action::SubmitSearch("x".into()),
            Action::ClearSearch,
            Action::SetSort(SortKey::Popular),
            hard(),
            Action::RemoveFilter(FilterKey::Difficulty),
            Action::ClearFilters,
        ];
        for action in actions {
            let mut state = on_page_three();
            state.apply(action.clone());
            assert_eq!(state.page, 1, "{action:?}");
        }
    }

    #[test]
    fn page_and_view_actions_keep_page() {
        let mut state = on_page_three();
        state.apply(Action::SetViewMode(ViewMode::List));
        assert_eq!(state.page, 3);

        state.apply(Action::GoToPage(5));
        assert_eq!(state.page, 5);
    }

    #[test]
    fn go_to_page_zero_clamps_to_one() {
        let mut state = on_page_three();
        state.apply(Action::GoToPage(0));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn submit_search_trims() {
        let mut state = ViewState::default();
        state.apply(Action::SubmitSearch("  choc \n".into()));
        assert_eq!(state.search, "choc");
    }

    #[test]
    fn set_filter_with_empty_value_removes_it() {
        let mut state = ViewState::default();
        state.apply(hard());
        state.apply(Action::SetFilter(FilterKey::Difficulty, String::new()));
        assert!(state.filters.is_empty());
    }

    #[test]
    fn clear_filters_keeps_sort_and_view() {
        let mut state = ViewState::default();
        state.apply(Action::SetSort(SortKey::Oldest));
        state.apply(Action::SetViewMode(ViewMode::List));
        state.apply(Action::SubmitSearch("choc".into()));
        state.apply(hard());
        state.apply(Action::GoToPage(2));

        state.apply(Action::ClearFilters);

        assert_eq!(state.search, "");
        assert!(state.filters.is_empty());
        assert_eq!(state.page, 1);
        assert_eq!(state.sort, SortKey::Oldest);
        assert_eq!(state.view, ViewMode::List);
    }

    #[test]
    fn transitions_leave_scope_alone() {
        let mut state = ViewState {
            scope: Scope::Category(EntityId::from("1")),
            ..ViewState::default()
        };
        state.apply(Action::ClearFilters);
        assert_eq!(state.scope, Scope::Category(EntityId::from("1")));
    }

    #[test]
    fn has_active_filters_tracks_search_and_filters() {
        let mut state = ViewState::default();
        assert!(!state.has_active_filters());
        state.apply(Action::SubmitSearch("x".into()));
        assert!(state.has_active_filters());
        state.apply(Action::ClearSearch);
        state.apply(hard());
        assert!(state.has_active_filters());
    }
}

//! Route resolution: URL → page intent + initial view state.
//!
//! The site is four static HTML shells. Which one is loaded decides what the
//! core renders:
//!
//! | Path | Page |
//! |------|------|
//! | `/`, `/index.html`, anything under the root marker | home |
//! | contains `recipe.html` | recipe detail (`?slug=`) |
//! | contains `category.html` | category listing (`?slug=`) |
//! | contains `author.html` | author listing (`?slug=`) |
//! | anything else | home |
//!
//! Rules are checked top to bottom and the first match wins, so a path such
//! as `/public/recipe.html` resolves to home.

use crate::view_state::ViewState;
use serde::Serialize;
use url::form_urlencoded;

/// The four kinds of page the site serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Home,
    Recipe,
    Category,
    Author,
}

impl PageKind {
    /// Path of the HTML shell for this page kind.
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Recipe => "/recipe.html",
            Self::Category => "/category.html",
            Self::Author => "/author.html",
        }
    }

    /// Whether pages of this kind are addressed by a `slug` parameter.
    pub fn has_entity(self) -> bool {
        !matches!(self, Self::Home)
    }
}

/// Site-relative link to an entity page, e.g. `/recipe.html?slug=lemon-tart`.
pub fn entity_href(kind: PageKind, slug: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(slug.as_bytes()).collect();
    format!("{}?slug={}", kind.path(), encoded)
}

/// Result of resolving a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub kind: PageKind,
    /// The `slug` parameter for entity pages. `None` when absent or empty,
    /// which later resolves to not-found.
    pub slug: Option<String>,
    /// The path as requested, kept so the URL can be rewritten in place.
    pub path: String,
    pub state: ViewState,
}

impl RouteMatch {
    /// Current URL (path + query) for this route and the given state.
    ///
    /// Entity pages keep their `slug` first; the remaining parameters follow
    /// [`ViewState::to_query`].
    pub fn url_for(&self, state: &ViewState) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(slug) = self.slug.as_deref().filter(|_| self.kind.has_entity()) {
            serializer.append_pair("slug", slug);
        }
        for (key, value) in state.query_pairs() {
            serializer.append_pair(key, &value);
        }
        let query = serializer.finish();
        if query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, query)
        }
    }
}

/// Maps request paths to page intents.
#[derive(Debug, Clone)]
pub struct RouteResolver {
    root_marker: String,
}

impl Default for RouteResolver {
    fn default() -> Self {
        Self::new("public")
    }
}

impl RouteResolver {
    pub fn new(root_marker: impl Into<String>) -> Self {
        Self {
            root_marker: root_marker.into(),
        }
    }

    /// Resolve a site-relative URL such as `/category.html?slug=desserts&page=2`.
    /// A `#fragment` is ignored.
    pub fn resolve_url(&self, url: &str) -> RouteMatch {
        let url = url.split_once('#').map_or(url, |(before, _)| before);
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        self.resolve(path, query)
    }

    /// Resolve a path and query string.
    pub fn resolve(&self, path: &str, query: &str) -> RouteMatch {
        let path = if path.is_empty() { "/" } else { path };
        let kind = self.page_kind(path);
        let slug = if kind.has_entity() {
            first_param(query, "slug").filter(|s| !s.is_empty())
        } else {
            None
        };
        RouteMatch {
            kind,
            slug,
            path: path.to_string(),
            state: ViewState::from_query(query),
        }
    }

    fn page_kind(&self, path: &str) -> PageKind {
        if path == "/" || path == "/index.html" || self.is_under_root_marker(path) {
            PageKind::Home
        } else if path.contains("recipe.html") {
            PageKind::Recipe
        } else if path.contains("category.html") {
            PageKind::Category
        } else if path.contains("author.html") {
            PageKind::Author
        } else {
            PageKind::Home
        }
    }

    fn is_under_root_marker(&self, path: &str) -> bool {
        let segment = format!("/{}", self.root_marker);
        path.contains(&format!("{segment}/")) || path.ends_with(&segment)
    }
}

fn first_param(query: &str, name: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

//! # Recipe Press
//!
//! The query and presentation core of a static recipe site. A site is four
//! JSON documents (site settings, recipes, categories, authors) plus a set
//! of HTML shells; everything a visitor sees is derived from the dataset and
//! the page URL.
//!
//! # Architecture: URL In, Page Out
//!
//! ```text
//! 1. Load       data/*.json   →  Dataset         (validated, drafts dropped)
//! 2. Route      URL           →  RouteMatch      (page kind, slug, ViewState)
//! 3. Query      Dataset + VS  →  QueryResult     (filter → sort → paginate)
//! 4. Present    QueryResult   →  PageModel       (cards, pagination, chips)
//! 5. Render     PageModel     →  HTML            (maud)
//! ```
//!
//! Every stage after loading is a pure function of its inputs. The only
//! mutable value is the [`view_state::ViewState`] owned by a
//! [`controller::Controller`], and it changes only through
//! [`view_state::Action`]s. The URL is a projection of that state and
//! round-trips back to it.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Entity records as they appear in the JSON documents |
//! | [`dataset`] | Parallel loading, validation, lookups by id and slug |
//! | [`route`] | URL → page kind + slug + view state, and back |
//! | [`view_state`] | Search, sort, filters, page, view mode; transition rules |
//! | [`query`] | Filter/sort/paginate pipeline over the published recipes |
//! | [`present`] | Render models: cards, detail, listings, tag clouds, pages |
//! | [`seo`] | Meta tags and schema.org JSON-LD |
//! | [`controller`] | Session owner: dispatch, debounced live search |
//! | [`render`] | Maud templates for page models |
//! | [`config`] | `recipe-press.toml` loading, merging, validation |
//! | [`output`] | CLI output formatting |
//! | [`telemetry`] | Tracing subscriber setup for the CLI |
//!
//! # Design Decisions
//!
//! ## Records, Not Markup
//!
//! The presentation layer produces plain serializable records; nothing in
//! [`present`] builds HTML strings. Templates live in [`render`] and can be
//! swapped without touching the rules that decide what a page shows.
//!
//! ## Soft References
//!
//! A recipe's category and author are ids resolved at render time. A
//! dangling id is logged and shown as a placeholder ("Uncategorized",
//! "Unknown"); it never fails a page. Duplicate published slugs, by
//! contrast, make the dataset ambiguous and fail the load.
//!
//! ## Injected Time
//!
//! Relative dates and the search debounce both take the current time as an
//! argument, so every output is reproducible under test.

pub mod config;
pub mod controller;
pub mod dataset;
pub mod output;
pub mod present;
pub mod query;
pub mod render;
pub mod route;
pub mod seo;
pub mod telemetry;
pub mod types;
pub mod view_state;

#[cfg(test)]
pub(crate) mod test_helpers;

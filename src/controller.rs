//! Session controller: owns the one [`ViewState`] for a page view.
//!
//! ```text
//! enter(url) ──► route + scope ──► render() ──► Page
//!                       ▲
//! dispatch(action) ─────┤   apply → re-query → Update { url, page }
//! search_input(term) ─► debounce ─► tick(now) ─► dispatch(SubmitSearch)
//! ```
//!
//! The UI layer forwards events and replaces the URL with the one in each
//! [`Update`]; it never mutates state itself. Time is passed in explicitly
//! so the debounce is deterministic under test.

use crate::config::{ConfigError, PressConfig};
use crate::dataset::Dataset;
use crate::present::PresentContext;
use crate::present::page::{PageModel, PageTarget, SiteChrome, build_page, site_chrome};
use crate::route::{RouteMatch, RouteResolver};
use crate::seo::{SeoMeta, StructuredData, page_seo, structured_data};
use crate::view_state::{Action, ViewState};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// Quiet period after the last keystroke before a live search fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Everything needed to paint one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub chrome: SiteChrome,
    pub seo: SeoMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<StructuredData>,
    pub body: PageModel,
}

/// Result of a state change: the URL to write back and the new page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Update {
    pub url: String,
    pub page: Page,
}

/// Last-write-wins debounce for the live search box.
#[derive(Debug, Clone, Default)]
pub struct SearchDebounce {
    pending: Option<(String, Instant)>,
}

impl SearchDebounce {
    /// Record a keystroke. Replaces any pending term and restarts the timer.
    pub fn input(&mut self, term: impl Into<String>, now: Instant) {
        self.pending = Some((term.into(), now + SEARCH_DEBOUNCE));
    }

    /// Take the pending term once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(term, _)| term),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

pub struct Controller<'a> {
    dataset: &'a Dataset,
    config: &'a PressConfig,
    origin: Url,
    route: RouteMatch,
    state: ViewState,
    debounce: SearchDebounce,
    now: DateTime<Utc>,
}

impl<'a> Controller<'a> {
    /// Start a session for `url` (site-relative path + query).
    pub fn enter(
        dataset: &'a Dataset,
        config: &'a PressConfig,
        url: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, ConfigError> {
        let origin = config.origin_url()?;
        let route = RouteResolver::new(&config.routing.root_marker).resolve_url(url);
        let mut state = route.state.clone();
        state.scope = PageTarget::resolve(dataset, &route).scope();
        debug!(kind = ?route.kind, slug = ?route.slug, "entered page");
        Ok(Self {
            dataset,
            config,
            origin,
            route,
            state,
            debounce: SearchDebounce::default(),
            now,
        })
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn route(&self) -> &RouteMatch {
        &self.route
    }

    pub fn target(&self) -> PageTarget<'a> {
        PageTarget::resolve(self.dataset, &self.route)
    }

    /// The URL reflecting the current state.
    pub fn url(&self) -> String {
        self.route.url_for(&self.state)
    }

    /// Reference time for relative dates.
    pub fn set_now(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }

    pub fn render(&self) -> Page {
        let target = self.target();
        let ctx = PresentContext::new(self.dataset, &self.config.display, self.now);
        let url = self.url();
        Page {
            chrome: site_chrome(self.dataset),
            seo: page_seo(self.dataset, &self.origin, &target, &url),
            structured_data: structured_data(self.dataset, &self.origin, &target, &url),
            body: build_page(&ctx, &target, &self.state),
        }
    }

    /// Apply one action, then re-render.
    pub fn dispatch(&mut self, action: Action) -> Update {
        // An explicit search supersedes whatever is still being typed.
        if matches!(action, Action::SubmitSearch(_) | Action::ClearSearch | Action::ClearFilters) {
            self.debounce.cancel();
        }
        debug!(?action, "dispatch");
        self.state.apply(action);
        Update {
            url: self.url(),
            page: self.render(),
        }
    }

    /// A keystroke in the live search box. Fires on a later [`tick`](Self::tick).
    pub fn search_input(&mut self, term: impl Into<String>, now: Instant) {
        self.debounce.input(term, now);
    }

    /// Fire the pending live search if its quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<Update> {
        let term = self.debounce.poll(now)?;
        Some(self.dispatch(Action::SubmitSearch(term)))
    }

    pub fn has_pending_search(&self) -> bool {
        self.debounce.is_pending()
    }
}

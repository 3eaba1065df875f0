//! Page-level models: one per page kind, plus the site chrome shared by all
//! of them and the error state shown when the dataset cannot be loaded.

use super::PresentContext;
use super::cards::{
    AuthorCard, CategoryCard, EntityLink, RecipeCard, author_card, author_card_with_count,
    avatar_or_default, category_card, recipe_card,
};
use super::detail::{RecipeDetail, recipe_detail};
use super::listing::{Listing, listing};
use super::related::{contributing_authors, related_authors, related_categories, related_recipes};
use super::tags::{TagCloudEntry, category_tag_cloud};
use super::count_label;
use crate::dataset::Dataset;
use crate::query::query;
use crate::route::{PageKind, RouteMatch, entity_href};
use crate::types::{Author, Category, Recipe};
use crate::view_state::{Scope, ViewState};
use serde::Serialize;
use std::collections::HashSet;

/// What a route points at once its slug has been looked up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageTarget<'a> {
    Home,
    Recipe(&'a Recipe),
    Category(&'a Category),
    Author(&'a Author),
    /// An entity page whose slug is missing or matches nothing.
    NotFound,
}

impl<'a> PageTarget<'a> {
    pub fn resolve(dataset: &'a Dataset, route: &RouteMatch) -> Self {
        let slug = route.slug.as_deref();
        let found = match route.kind {
            PageKind::Home => return Self::Home,
            PageKind::Recipe => slug.and_then(|s| dataset.recipe_by_slug(s)).map(Self::Recipe),
            PageKind::Category => slug
                .and_then(|s| dataset.category_by_slug(s))
                .map(Self::Category),
            PageKind::Author => slug.and_then(|s| dataset.author_by_slug(s)).map(Self::Author),
        };
        found.unwrap_or(Self::NotFound)
    }

    /// Listing restriction implied by the page.
    pub fn scope(&self) -> Scope {
        match self {
            Self::Category(c) => Scope::Category(c.id.clone()),
            Self::Author(a) => Scope::Author(a.id.clone()),
            Self::Home | Self::Recipe(_) | Self::NotFound => Scope::None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

// ============================================================================
// Site chrome
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteChrome {
    pub site_name: String,
    pub logo: String,
    pub logo_alt: String,
    pub footer_categories: Vec<EntityLink>,
}

pub fn site_chrome(dataset: &Dataset) -> SiteChrome {
    let site = dataset.site();
    SiteChrome {
        site_name: site.site_name.clone(),
        logo: site.logo.clone(),
        logo_alt: format!("{} logo", site.site_name),
        footer_categories: dataset
            .categories()
            .iter()
            .map(|c| EntityLink::linked(&c.title, entity_href(PageKind::Category, &c.slug)))
            .collect(),
    }
}

// ============================================================================
// Page models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageModel {
    Home(HomePage),
    Recipe(RecipePage),
    Category(CategoryPage),
    Author(AuthorPage),
    NotFound(NotFoundPage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HomeStats {
    pub recipes: usize,
    pub categories: usize,
    pub authors: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomePage {
    pub stats: HomeStats,
    pub listing: Listing,
    pub categories: Vec<CategoryCard>,
    pub authors: Vec<AuthorCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipePage {
    pub detail: RecipeDetail,
    pub related: Vec<RecipeCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPill {
    pub label: String,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub recipes: usize,
    pub authors: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPage {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub breadcrumb: Vec<EntityLink>,
    pub pills: Vec<CategoryPill>,
    pub stats: CategoryStats,
    pub listing: Listing,
    pub tag_cloud: Vec<TagCloudEntry>,
    /// Authors with recipes in this category, counted within it.
    pub authors: Vec<AuthorCard>,
    pub related_categories: Vec<CategoryCard>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthorStats {
    pub recipes: usize,
    pub categories: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorPage {
    pub slug: String,
    pub name: String,
    pub bio: String,
    pub avatar: String,
    pub avatar_alt: String,
    pub breadcrumb: Vec<EntityLink>,
    pub stats: AuthorStats,
    pub listing: Listing,
    pub related_authors: Vec<AuthorCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFoundPage {
    pub title: String,
    pub message: String,
    pub home_href: String,
}

impl Default for NotFoundPage {
    fn default() -> Self {
        Self {
            title: "404 - Page Not Found".to_string(),
            message: "The page you're looking for doesn't exist or may have been moved."
                .to_string(),
            home_href: "/".to_string(),
        }
    }
}

/// Shown instead of any page when the dataset failed to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorState {
    pub title: String,
    pub message: String,
    pub action_label: String,
}

impl ErrorState {
    pub fn load_failure() -> Self {
        Self {
            title: "Something went wrong".to_string(),
            message: "Failed to load application data".to_string(),
            action_label: "Reload Page".to_string(),
        }
    }
}

/// Build the model for `target`. `state.scope` must already match the
/// target (see [`PageTarget::scope`]).
pub fn build_page(ctx: &PresentContext<'_>, target: &PageTarget<'_>, state: &ViewState) -> PageModel {
    match *target {
        PageTarget::Home => PageModel::Home(home_page(ctx, state)),
        PageTarget::Recipe(recipe) => PageModel::Recipe(recipe_page(ctx, recipe)),
        PageTarget::Category(category) => PageModel::Category(category_page(ctx, category, state)),
        PageTarget::Author(author) => PageModel::Author(author_page(ctx, author, state)),
        PageTarget::NotFound => PageModel::NotFound(NotFoundPage::default()),
    }
}

fn current_listing(ctx: &PresentContext<'_>, state: &ViewState) -> Listing {
    let result = query(ctx.dataset, state);
    listing(ctx, state, &result)
}

fn home_page(ctx: &PresentContext<'_>, state: &ViewState) -> HomePage {
    let data = ctx.dataset;
    HomePage {
        stats: HomeStats {
            recipes: data.recipes().len(),
            categories: data.categories().len(),
            authors: data.authors().len(),
        },
        listing: current_listing(ctx, state),
        categories: data
            .categories()
            .iter()
            .map(|c| category_card(ctx, c, None))
            .collect(),
        authors: data
            .authors()
            .iter()
            .map(|a| author_card(ctx, a, ctx.display.author_bio_chars))
            .collect(),
    }
}

fn recipe_page(ctx: &PresentContext<'_>, recipe: &Recipe) -> RecipePage {
    RecipePage {
        detail: recipe_detail(ctx, recipe),
        related: related_recipes(ctx.dataset, recipe, ctx.display.related_limit)
            .into_iter()
            .map(|r| recipe_card(ctx, r))
            .collect(),
    }
}

fn category_page(ctx: &PresentContext<'_>, category: &Category, state: &ViewState) -> CategoryPage {
    let data = ctx.dataset;
    let display = ctx.display;
    let distinct_authors: HashSet<_> = data
        .recipes_in_category(&category.id)
        .map(|r| &r.author_id)
        .collect();

    CategoryPage {
        slug: category.slug.clone(),
        title: category.title.clone(),
        description: category.description.clone(),
        breadcrumb: vec![
            EntityLink::linked("Home", "/"),
            EntityLink::plain(&category.title),
        ],
        pills: data
            .categories()
            .iter()
            .map(|c| CategoryPill {
                label: c.title.clone(),
                href: entity_href(PageKind::Category, &c.slug),
                active: c.id == category.id,
            })
            .collect(),
        stats: CategoryStats {
            recipes: data.recipes_in_category(&category.id).count(),
            authors: distinct_authors.len(),
        },
        listing: current_listing(ctx, state),
        tag_cloud: category_tag_cloud(data, category, display.tag_cloud_limit),
        authors: contributing_authors(data, &category.id)
            .into_iter()
            .map(|(author, count)| {
                author_card_with_count(
                    ctx,
                    author,
                    display.featured_bio_chars,
                    count,
                    format!("{} in this category", count_label(count, "recipe")),
                )
            })
            .collect(),
        related_categories: related_categories(data, category, display.related_limit)
            .into_iter()
            .map(|c| category_card(ctx, c, Some(display.category_description_chars)))
            .collect(),
    }
}

fn author_page(ctx: &PresentContext<'_>, author: &Author, state: &ViewState) -> AuthorPage {
    let data = ctx.dataset;
    let distinct_categories: HashSet<_> = data
        .recipes_by_author(&author.id)
        .map(|r| &r.category_id)
        .collect();

    AuthorPage {
        slug: author.slug.clone(),
        name: author.name.clone(),
        bio: author.bio.clone(),
        avatar: avatar_or_default(ctx, author),
        avatar_alt: format!("{} - Author Photo", author.name),
        breadcrumb: vec![
            EntityLink::linked("Home", "/"),
            EntityLink::plain(&author.name),
        ],
        stats: AuthorStats {
            recipes: data.recipes_by_author(&author.id).count(),
            categories: distinct_categories.len(),
        },
        listing: current_listing(ctx, state),
        related_authors: related_authors(data, author, ctx.display.related_limit)
            .into_iter()
            .map(|a| author_card(ctx, a, ctx.display.featured_bio_chars))
            .collect(),
    }
}

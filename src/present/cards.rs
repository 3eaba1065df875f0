//! Card summaries for recipes, categories and authors.
//!
//! Category and author references on a recipe are soft: a dangling id
//! renders as "Uncategorized" / "Unknown" with no link, and the author
//! falls back to the configured default avatar.

use super::dates::{iso_date, relative_date};
use super::{PresentContext, count_label, truncate_text};
use crate::route::{PageKind, entity_href};
use crate::types::{Author, Category, Recipe};
use serde::Serialize;

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A label with an optional link. `href` is `None` for placeholders and
/// for the current page in a breadcrumb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityLink {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl EntityLink {
    pub fn linked(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
        }
    }

    pub fn plain(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeCard {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub image: String,
    pub href: String,
    pub category: EntityLink,
    pub author: EntityLink,
    pub author_avatar: String,
    /// The first `card_tag_limit` tags, in recipe order.
    pub tags: Vec<String>,
    /// Tags left out of `tags`, shown as `+N`.
    pub tag_overflow: usize,
    pub difficulty: String,
    pub date_label: String,
    pub date_iso: String,
}

pub fn recipe_card(ctx: &PresentContext<'_>, recipe: &Recipe) -> RecipeCard {
    let limit = ctx.display.card_tag_limit;
    let author = ctx.dataset.author(&recipe.author_id);
    RecipeCard {
        slug: recipe.slug.clone(),
        title: recipe.title.clone(),
        excerpt: recipe.excerpt.clone(),
        image: recipe.image.clone(),
        href: entity_href(PageKind::Recipe, &recipe.slug),
        category: category_link(ctx, recipe),
        author: author_link(ctx, recipe),
        author_avatar: author
            .map(|a| avatar_or_default(ctx, a))
            .unwrap_or_else(|| ctx.display.default_avatar.clone()),
        tags: recipe.tags.iter().take(limit).cloned().collect(),
        tag_overflow: recipe.tags.len().saturating_sub(limit),
        difficulty: recipe.difficulty.label(),
        date_label: relative_date(recipe.created_at, ctx.now),
        date_iso: iso_date(recipe.created_at),
    }
}

/// The recipe's category as a link, or the "Uncategorized" placeholder.
pub fn category_link(ctx: &PresentContext<'_>, recipe: &Recipe) -> EntityLink {
    match ctx.dataset.category(&recipe.category_id) {
        Some(c) => EntityLink::linked(&c.title, entity_href(PageKind::Category, &c.slug)),
        None => EntityLink::plain(UNCATEGORIZED),
    }
}

/// The recipe's author as a link, or the "Unknown" placeholder.
pub fn author_link(ctx: &PresentContext<'_>, recipe: &Recipe) -> EntityLink {
    match ctx.dataset.author(&recipe.author_id) {
        Some(a) => EntityLink::linked(&a.name, entity_href(PageKind::Author, &a.slug)),
        None => EntityLink::plain(UNKNOWN_AUTHOR),
    }
}

pub(crate) fn avatar_or_default(ctx: &PresentContext<'_>, author: &Author) -> String {
    if author.avatar.is_empty() {
        ctx.display.default_avatar.clone()
    } else {
        author.avatar.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCard {
    pub slug: String,
    pub title: String,
    pub href: String,
    pub description: String,
    /// Image of the category's first recipe. `None` renders a placeholder.
    pub image: Option<String>,
    pub recipe_count: usize,
    pub count_label: String,
}

/// Category card. `description_chars` truncates the description; `None`
/// keeps it whole.
pub fn category_card(
    ctx: &PresentContext<'_>,
    category: &Category,
    description_chars: Option<usize>,
) -> CategoryCard {
    let mut recipes = ctx.dataset.recipes_in_category(&category.id);
    let featured = recipes.next();
    let recipe_count = featured.map_or(0, |_| 1 + recipes.count());
    CategoryCard {
        slug: category.slug.clone(),
        title: category.title.clone(),
        href: entity_href(PageKind::Category, &category.slug),
        description: match description_chars {
            Some(max) => truncate_text(&category.description, max),
            None => category.description.clone(),
        },
        image: featured.map(|r| r.image.clone()),
        recipe_count,
        count_label: count_label(recipe_count, "recipe"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorCard {
    pub slug: String,
    pub name: String,
    pub href: String,
    pub avatar: String,
    pub bio: String,
    pub recipe_count: usize,
    pub count_label: String,
}

/// Author card counting all of the author's published recipes.
pub fn author_card(ctx: &PresentContext<'_>, author: &Author, bio_chars: usize) -> AuthorCard {
    let recipe_count = ctx.dataset.recipes_by_author(&author.id).count();
    author_card_with_count(
        ctx,
        author,
        bio_chars,
        recipe_count,
        count_label(recipe_count, "recipe"),
    )
}

/// Author card with a caller-supplied count, e.g. recipes within one category.
pub fn author_card_with_count(
    ctx: &PresentContext<'_>,
    author: &Author,
    bio_chars: usize,
    recipe_count: usize,
    count_label: String,
) -> AuthorCard {
    AuthorCard {
        slug: author.slug.clone(),
        name: author.name.clone(),
        href: entity_href(PageKind::Author, &author.slug),
        avatar: avatar_or_default(ctx, author),
        bio: truncate_text(&author.bio, bio_chars),
        recipe_count,
        count_label,
    }
}

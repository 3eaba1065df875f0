//! The recipe detail view.

use super::PresentContext;
use super::cards::{EntityLink, UNCATEGORIZED, author_link, avatar_or_default, category_link};
use super::dates::{iso_date, relative_date};
use crate::types::Recipe;
use serde::Serialize;
use url::form_urlencoded;

/// One checklist row. `index` is zero-based and stable so a UI can key
/// checkbox state on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientItem {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepItem {
    /// 1-based.
    pub number: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeDetail {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub image: String,
    /// Home → category → recipe. The last entry is the current page.
    pub breadcrumb: Vec<EntityLink>,
    pub author: EntityLink,
    pub author_avatar: String,
    pub category: EntityLink,
    pub date_label: String,
    pub date_iso: String,
    pub difficulty: String,
    pub ingredients: Vec<IngredientItem>,
    pub steps: Vec<StepItem>,
    /// Each tag links to a home-page search for it.
    pub tags: Vec<EntityLink>,
}

pub fn recipe_detail(ctx: &PresentContext<'_>, recipe: &Recipe) -> RecipeDetail {
    let category = category_link(ctx, recipe);
    let breadcrumb = vec![
        EntityLink::linked("Home", "/"),
        category.clone(),
        EntityLink::plain(&recipe.title),
    ];
    RecipeDetail {
        slug: recipe.slug.clone(),
        title: recipe.title.clone(),
        excerpt: recipe.excerpt.clone(),
        image: recipe.image.clone(),
        breadcrumb,
        author: author_link(ctx, recipe),
        author_avatar: ctx
            .dataset
            .author(&recipe.author_id)
            .map(|a| avatar_or_default(ctx, a))
            .unwrap_or_else(|| ctx.display.default_avatar.clone()),
        category,
        date_label: relative_date(recipe.created_at, ctx.now),
        date_iso: iso_date(recipe.created_at),
        difficulty: recipe.difficulty.label(),
        ingredients: recipe
            .ingredients
            .iter()
            .enumerate()
            .map(|(index, text)| IngredientItem {
                index,
                text: text.clone(),
            })
            .collect(),
        steps: recipe
            .steps
            .iter()
            .enumerate()
            .map(|(i, text)| StepItem {
                number: i + 1,
                text: text.clone(),
            })
            .collect(),
        tags: recipe
            .tags
            .iter()
            .map(|tag| EntityLink::linked(tag, tag_search_href(tag)))
            .collect(),
    }
}

/// `/?search=<tag>`
pub fn tag_search_href(tag: &str) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("search", tag)
        .finish();
    format!("/?{query}")
}

impl RecipeDetail {
    /// Whether the category crumb is a placeholder.
    pub fn is_uncategorized(&self) -> bool {
        self.category.href.is_none() && self.category.label == UNCATEGORIZED
    }
}

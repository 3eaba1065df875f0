//! SEO metadata and schema.org structured data.
//!
//! Every page gets a [`SeoMeta`] (document title, meta description, social
//! image, canonical URL). Recipe, category and author pages also get a
//! JSON-LD payload:
//!
//! | Page | `@type` |
//! |------|---------|
//! | recipe | `Recipe` |
//! | author | `Person` |
//! | category | `CollectionPage` wrapping an `ItemList` of up to 5 recipes |
//!
//! Relative image and page paths are made absolute against the configured
//! origin; `http(s)://` values pass through untouched.

use crate::dataset::Dataset;
use crate::present::dates::iso_date;
use crate::present::page::PageTarget;
use crate::route::{PageKind, entity_href};
use crate::types::{Author, Category, Recipe};
use serde::Serialize;
use url::Url;

const SCHEMA_CONTEXT: &str = "https://schema.org";
/// Recipes listed in a category's `ItemList`.
const COLLECTION_ITEMS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoMeta {
    pub title: String,
    pub description: String,
    /// Absolute social-card image. `None` leaves the page default in place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub canonical_url: String,
}

/// Resolve `path` against `origin` unless it is already absolute.
pub fn absolute_url(origin: &Url, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    origin
        .join(path)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| path.to_string())
}

fn image_url(origin: &Url, path: &str) -> Option<String> {
    (!path.is_empty()).then(|| absolute_url(origin, path))
}

/// Meta tags for the page at `current_url` (site-relative path + query).
pub fn page_seo(dataset: &Dataset, origin: &Url, target: &PageTarget<'_>, current_url: &str) -> SeoMeta {
    let site = &dataset.site().site_name;
    let canonical_url = absolute_url(origin, current_url);
    let (title, description, image) = match *target {
        PageTarget::Home => (
            site.clone(),
            dataset
                .site()
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| format!("Browse all recipes from {site}")),
            image_url(origin, &dataset.site().logo),
        ),
        PageTarget::Recipe(recipe) => (
            non_empty(&recipe.seo.title).unwrap_or_else(|| format!("{} | {site}", recipe.title)),
            non_empty(&recipe.seo.description).unwrap_or_else(|| recipe.excerpt.clone()),
            image_url(origin, &recipe.image),
        ),
        PageTarget::Category(category) => (
            format!("{} Recipes | {site}", category.title),
            non_empty(&category.description).unwrap_or_else(|| {
                format!("Browse all {} recipes", category.title.to_lowercase())
            }),
            dataset
                .recipes_in_category(&category.id)
                .next()
                .and_then(|r| image_url(origin, &r.image)),
        ),
        PageTarget::Author(author) => (
            format!("Recipes by {} | {site}", author.name),
            non_empty(&author.bio).unwrap_or_else(|| format!("Browse all recipes by {}", author.name)),
            image_url(origin, &author.avatar),
        ),
        PageTarget::NotFound => (
            format!("Page Not Found | {site}"),
            "The page you're looking for doesn't exist or may have been moved.".to_string(),
            None,
        ),
    };
    SeoMeta {
        title,
        description,
        image,
        canonical_url,
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

// ============================================================================
// Structured data
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuredData {
    Recipe(RecipeSchema),
    Person(PersonSchema),
    Collection(CollectionPageSchema),
}

impl StructuredData {
    pub fn schema_type(&self) -> &'static str {
        match self {
            Self::Recipe(s) => s.kind,
            Self::Person(s) => s.kind,
            Self::Collection(s) => s.kind,
        }
    }

    /// Pretty-printed JSON-LD.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonRef {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HowToStep {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub text: String,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub description: String,
    pub image: String,
    pub author: PersonRef,
    pub date_published: String,
    pub recipe_category: String,
    pub keywords: String,
    pub recipe_ingredient: Vec<String>,
    pub recipe_instructions: Vec<HowToStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub description: String,
    pub image: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub position: usize,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemList {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub number_of_items: usize,
    pub item_list_element: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPageSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub description: String,
    pub url: String,
    pub main_entity: ItemList,
}

/// JSON-LD for the page, or `None` for home and not-found pages.
pub fn structured_data(
    dataset: &Dataset,
    origin: &Url,
    target: &PageTarget<'_>,
    current_url: &str,
) -> Option<StructuredData> {
    let page_url = absolute_url(origin, current_url);
    match *target {
        PageTarget::Recipe(recipe) => Some(StructuredData::Recipe(recipe_schema(dataset, origin, recipe))),
        PageTarget::Author(author) => Some(StructuredData::Person(person_schema(origin, author, page_url))),
        PageTarget::Category(category) => Some(StructuredData::Collection(collection_schema(
            dataset, origin, category, page_url,
        ))),
        PageTarget::Home | PageTarget::NotFound => None,
    }
}

pub fn recipe_schema(dataset: &Dataset, origin: &Url, recipe: &Recipe) -> RecipeSchema {
    RecipeSchema {
        context: SCHEMA_CONTEXT,
        kind: "Recipe",
        name: recipe.title.clone(),
        description: recipe.excerpt.clone(),
        image: absolute_url(origin, &recipe.image),
        author: PersonRef {
            kind: "Person",
            name: dataset
                .author(&recipe.author_id)
                .map_or_else(|| "Unknown".to_string(), |a| a.name.clone()),
        },
        date_published: iso_date(recipe.created_at),
        recipe_category: dataset
            .category(&recipe.category_id)
            .map_or_else(|| "Recipe".to_string(), |c| c.title.clone()),
        keywords: recipe.tags.join(", "),
        recipe_ingredient: recipe.ingredients.clone(),
        recipe_instructions: recipe
            .steps
            .iter()
            .enumerate()
            .map(|(i, text)| HowToStep {
                kind: "HowToStep",
                text: text.clone(),
                position: i + 1,
            })
            .collect(),
    }
}

pub fn person_schema(origin: &Url, author: &Author, page_url: String) -> PersonSchema {
    PersonSchema {
        context: SCHEMA_CONTEXT,
        kind: "Person",
        name: author.name.clone(),
        description: author.bio.clone(),
        image: absolute_url(origin, &author.avatar),
        url: page_url,
    }
}

pub fn collection_schema(
    dataset: &Dataset,
    origin: &Url,
    category: &Category,
    page_url: String,
) -> CollectionPageSchema {
    let recipes: Vec<&Recipe> = dataset.recipes_in_category(&category.id).collect();
    CollectionPageSchema {
        context: SCHEMA_CONTEXT,
        kind: "CollectionPage",
        name: category.title.clone(),
        description: category.description.clone(),
        url: page_url,
        main_entity: ItemList {
            kind: "ItemList",
            number_of_items: recipes.len(),
            item_list_element: recipes
                .iter()
                .take(COLLECTION_ITEMS)
                .enumerate()
                .map(|(i, r)| ListItem {
                    kind: "Recipe",
                    position: i + 1,
                    name: r.title.clone(),
                    url: absolute_url(origin, &entity_href(PageKind::Recipe, &r.slug)),
                })
                .collect(),
        },
    }
}

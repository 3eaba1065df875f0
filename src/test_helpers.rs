//! Shared test utilities for the recipe-press test suite.
//!
//! Provides entity builders with sensible defaults, a loader for the JSON
//! fixtures under `fixtures/data/`, and lookup helpers that panic with the
//! list of available entries on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut cake = recipe("1", "Chocolate Cake");
//! cake.tags = tags(&["chocolate", "baking"]);
//! let data = dataset(vec![cake], vec![category("c1", "Desserts")], vec![]);
//!
//! let fixtures = fixture_dataset();
//! let tart = find_recipe(&fixtures, "lemon-tart");
//! ```

use chrono::{DateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::dataset::{self, Dataset};
use crate::types::{Author, Category, Difficulty, EntityId, Recipe, RecipeSeo, SiteConfig};

// =========================================================================
// Entity builders
// =========================================================================

/// Midnight UTC on the given date.
pub fn day(year: i32, month: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, d, 0, 0, 0).unwrap()
}

pub fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// A published easy recipe in category `c1` by author `a1`, created 2024-01-01.
/// The slug is the lowercased title with spaces turned into dashes.
pub fn recipe(id: &str, title: &str) -> Recipe {
    Recipe {
        id: EntityId::from(id),
        slug: title.to_lowercase().replace(' ', "-"),
        title: title.to_string(),
        excerpt: format!("{title} excerpt"),
        image: format!("/images/{id}.jpg"),
        ingredients: vec![],
        steps: vec![],
        tags: vec![],
        category_id: EntityId::from("c1"),
        author_id: EntityId::from("a1"),
        created_at: day(2024, 1, 1),
        difficulty: Difficulty::Easy,
        published: true,
        seo: RecipeSeo::default(),
    }
}

pub fn category(id: &str, title: &str) -> Category {
    Category {
        id: EntityId::from(id),
        slug: title.to_lowercase().replace(' ', "-"),
        title: title.to_string(),
        description: format!("All about {}", title.to_lowercase()),
    }
}

pub fn author(id: &str, name: &str) -> Author {
    Author {
        id: EntityId::from(id),
        slug: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        bio: format!("{name} cooks things."),
        avatar: format!("/avatars/{id}.jpg"),
    }
}

pub fn site(items_per_page: usize) -> SiteConfig {
    SiteConfig {
        site_name: "Test Kitchen".to_string(),
        logo: "/logo.png".to_string(),
        items_per_page,
        description: None,
    }
}

/// Build a dataset with the default page size (12). Panics on validation errors.
pub fn dataset(recipes: Vec<Recipe>, categories: Vec<Category>, authors: Vec<Author>) -> Dataset {
    Dataset::new(site(12), recipes, categories, authors).unwrap()
}

/// `count` recipes titled "Recipe 01".., created one day apart starting 2024-01-01.
pub fn numbered_recipes(count: usize) -> Vec<Recipe> {
    (1..=count)
        .map(|n| {
            let mut r = recipe(&n.to_string(), &format!("Recipe {n:02}"));
            r.created_at = day(2024, 1, 1) + chrono::Duration::days(n as i64 - 1);
            r
        })
        .collect()
}

// =========================================================================
// Fixtures
// =========================================================================

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/data")
}

/// The dataset in `fixtures/data/`, loaded through the real loader.
pub fn fixture_dataset() -> Dataset {
    dataset::load_dataset(&fixtures_dir()).unwrap()
}

/// Copy `fixtures/data/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate (delete or corrupt files)
/// without affecting other tests or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    for entry in std::fs::read_dir(fixtures_dir()).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), tmp.path().join(entry.file_name())).unwrap();
    }
    tmp
}

// =========================================================================
// Lookups and extractors
// =========================================================================

/// Find a published recipe by slug. Panics if not found.
pub fn find_recipe<'a>(data: &'a Dataset, slug: &str) -> &'a Recipe {
    data.recipe_by_slug(slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = data.recipes().iter().map(|r| r.slug.as_str()).collect();
        panic!("recipe '{slug}' not found. Available: {slugs:?}")
    })
}

/// Find a category by slug. Panics if not found.
pub fn find_category<'a>(data: &'a Dataset, slug: &str) -> &'a Category {
    data.category_by_slug(slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = data.categories().iter().map(|c| c.slug.as_str()).collect();
        panic!("category '{slug}' not found. Available: {slugs:?}")
    })
}

/// Find an author by slug. Panics if not found.
pub fn find_author<'a>(data: &'a Dataset, slug: &str) -> &'a Author {
    data.author_by_slug(slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = data.authors().iter().map(|a| a.slug.as_str()).collect();
        panic!("author '{slug}' not found. Available: {slugs:?}")
    })
}

/// Titles in result order.
pub fn titles<'a>(recipes: &[&'a Recipe]) -> Vec<&'a str> {
    recipes.iter().map(|r| r.title.as_str()).collect()
}

/// Slugs in result order.
pub fn slugs<'a>(recipes: &[&'a Recipe]) -> Vec<&'a str> {
    recipes.iter().map(|r| r.slug.as_str()).collect()
}

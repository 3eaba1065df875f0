//! Dataset loading and lookups.
//!
//! A site publishes four JSON documents in its data directory:
//!
//! ```text
//! data/
//! ├── site_config.json   # { siteName, logo, itemsPerPage }
//! ├── recipes.json       # [Recipe], including unpublished drafts
//! ├── categories.json    # [Category]
//! └── authors.json       # [Author]
//! ```
//!
//! All four are read concurrently and must all succeed: a single failure
//! aborts the load and no partial dataset is ever returned. Unpublished
//! recipes are dropped on load, so every other module only ever sees
//! published recipes, in file order.
//!
//! Category and author references are soft. A recipe pointing at a missing
//! category or author is kept and rendered with a placeholder; the loader
//! only logs it.

use crate::types::{Author, Category, EntityId, Recipe, SiteConfig};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// One of the four JSON documents that make up a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    SiteConfig,
    Recipes,
    Categories,
    Authors,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::SiteConfig,
        Resource::Recipes,
        Resource::Categories,
        Resource::Authors,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::SiteConfig => "site_config.json",
            Self::Recipes => "recipes.json",
            Self::Categories => "categories.json",
            Self::Authors => "authors.json",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read {resource}: {source}")]
    Io {
        resource: Resource,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {resource}: {source}")]
    Json {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate published recipe slug: {0}")]
    DuplicateSlug(String),
}

impl DatasetError {
    /// The resource that failed, if the error is tied to one file.
    pub fn resource(&self) -> Option<Resource> {
        match self {
            Self::Io { resource, .. } | Self::Json { resource, .. } => Some(*resource),
            Self::DuplicateSlug(_) => None,
        }
    }
}

/// Which side of a recipe's soft reference failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Category,
    Author,
}

/// A recipe whose category or author id matches nothing in the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub recipe_slug: String,
    pub kind: ReferenceKind,
    pub id: EntityId,
}

/// The validated, immutable dataset for one page view.
#[derive(Debug, Clone)]
pub struct Dataset {
    site: SiteConfig,
    recipes: Vec<Recipe>,
    categories: Vec<Category>,
    authors: Vec<Author>,
}

impl Dataset {
    /// Assemble a dataset from already-parsed documents.
    ///
    /// Drops unpublished recipes and rejects duplicate slugs among the
    /// published ones. Drafts may reuse a published slug.
    pub fn new(
        site: SiteConfig,
        recipes: Vec<Recipe>,
        categories: Vec<Category>,
        authors: Vec<Author>,
    ) -> Result<Self, DatasetError> {
        let total = recipes.len();
        let recipes: Vec<Recipe> = recipes.into_iter().filter(|r| r.published).collect();
        debug!(
            total,
            published = recipes.len(),
            "dropped unpublished recipes"
        );

        let mut seen = HashSet::new();
        for recipe in &recipes {
            if !seen.insert(recipe.slug.as_str()) {
                return Err(DatasetError::DuplicateSlug(recipe.slug.clone()));
            }
        }

        for recipe in recipes.iter().filter(|r| !r.difficulty.is_known()) {
            warn!(
                recipe = %recipe.slug,
                difficulty = recipe.difficulty.as_str(),
                "unrecognized difficulty; it will render as written"
            );
        }

        let dataset = Self {
            site,
            recipes,
            categories,
            authors,
        };
        for dangling in dataset.dangling_references() {
            warn!(
                recipe = %dangling.recipe_slug,
                kind = ?dangling.kind,
                id = %dangling.id,
                "recipe references a missing entity; it will render with a placeholder"
            );
        }
        Ok(dataset)
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Published recipes in file order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn category(&self, id: &EntityId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub fn author(&self, id: &EntityId) -> Option<&Author> {
        self.authors.iter().find(|a| &a.id == id)
    }

    pub fn recipe_by_slug(&self, slug: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.slug == slug)
    }

    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    pub fn author_by_slug(&self, slug: &str) -> Option<&Author> {
        self.authors.iter().find(|a| a.slug == slug)
    }

    pub fn recipes_in_category<'a>(
        &'a self,
        id: &'a EntityId,
    ) -> impl Iterator<Item = &'a Recipe> + 'a {
        self.recipes.iter().filter(move |r| &r.category_id == id)
    }

    pub fn recipes_by_author<'a>(&'a self, id: &'a EntityId) -> impl Iterator<Item = &'a Recipe> + 'a {
        self.recipes.iter().filter(move |r| &r.author_id == id)
    }

    /// Every unresolved category/author reference, in recipe order.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();
        for recipe in &self.recipes {
            if self.category(&recipe.category_id).is_none() {
                dangling.push(DanglingReference {
                    recipe_slug: recipe.slug.clone(),
                    kind: ReferenceKind::Category,
                    id: recipe.category_id.clone(),
                });
            }
            if self.author(&recipe.author_id).is_none() {
                dangling.push(DanglingReference {
                    recipe_slug: recipe.slug.clone(),
                    kind: ReferenceKind::Author,
                    id: recipe.author_id.clone(),
                });
            }
        }
        dangling
    }
}

/// Load and validate the dataset from a data directory.
///
/// The four documents are read in parallel; all must parse. When several
/// fail, the error for the first one in [`Resource::ALL`] order is returned.
pub fn load_dataset(dir: &Path) -> Result<Dataset, DatasetError> {
    let ((site, recipes), (categories, authors)) = rayon::join(
        || {
            rayon::join(
                || read_resource::<SiteConfig>(dir, Resource::SiteConfig),
                || read_resource::<Vec<Recipe>>(dir, Resource::Recipes),
            )
        },
        || {
            rayon::join(
                || read_resource::<Vec<Category>>(dir, Resource::Categories),
                || read_resource::<Vec<Author>>(dir, Resource::Authors),
            )
        },
    );

    let dataset = Dataset::new(site?, recipes?, categories?, authors?)?;
    info!(
        dir = %dir.display(),
        recipes = dataset.recipes.len(),
        categories = dataset.categories.len(),
        authors = dataset.authors.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

fn read_resource<T: DeserializeOwned>(dir: &Path, resource: Resource) -> Result<T, DatasetError> {
    let path = dir.join(resource.file_name());
    debug!(path = %path.display(), "reading resource");
    let content = fs::read_to_string(&path).map_err(|source| DatasetError::Io { resource, source })?;
    serde_json::from_str(&content).map_err(|source| DatasetError::Json { resource, source })
}

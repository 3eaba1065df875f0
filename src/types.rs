//! Dataset entities shared by every stage of the pipeline.
//!
//! These types mirror the four JSON documents published next to the site
//! (`site_config.json`, `recipes.json`, `categories.json`, `authors.json`).
//! Field names are camelCase on the wire. Unknown fields are ignored so the
//! data files can carry extra keys for other consumers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Items per listing page when the site config leaves it unset (or zero).
pub const DEFAULT_ITEMS_PER_PAGE: usize = 12;

/// Opaque entity identifier.
///
/// The data files use both numeric (`"id": 3`) and string (`"id": "c-3"`)
/// ids. Both normalize to their string form so references compare equal
/// regardless of how they were written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

/// Recipe difficulty as published in `recipes.json`.
///
/// The three known levels match case-insensitively. Anything else is kept
/// verbatim in [`Difficulty::Other`] and rendered as written, so one odd
/// value never fails the load.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Other(String),
}

impl Difficulty {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "easy" => Self::Easy,
            "medium" => Self::Medium,
            "hard" => Self::Hard,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Wire value, also used as the `difficulty` URL parameter value.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Other(raw) => raw,
        }
    }

    /// Capitalized label for display. Unknown values show as written.
    pub fn label(&self) -> String {
        match self {
            Self::Easy => "Easy".to_string(),
            Self::Medium => "Medium".to_string(),
            Self::Hard => "Hard".to_string(),
            Self::Other(raw) => raw.clone(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Serialize for Difficulty {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Per-recipe SEO overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeSeo {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: EntityId,
    /// URL identifier, unique among published recipes.
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    /// Image path or URL, usually site-relative (`/images/cake.jpg`).
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Soft reference to a [`Category`]; may dangle.
    pub category_id: EntityId,
    /// Soft reference to an [`Author`]; may dangle.
    pub author_id: EntityId,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub seo: RecipeSeo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: EntityId,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar: String,
}

/// Site-wide settings from `site_config.json`. Immutable for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub site_name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub items_per_page: usize,
    /// Home page meta description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SiteConfig {
    /// Listing page size. Zero is treated as unset.
    pub fn page_size(&self) -> usize {
        if self.items_per_page == 0 {
            DEFAULT_ITEMS_PER_PAGE
        } else {
            self.items_per_page
        }
    }
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
fn deserialize_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid timestamp '{raw}' (expected RFC 3339 or YYYY-MM-DD)"))
    })
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn numeric_and_string_ids_normalize() {
        let ids: Vec<EntityId> = serde_json::from_str(r#"[3, "3", "c-3"]"#).unwrap();
        assert_eq!(ids[0], ids[1]);
        assert_eq!(ids[2].as_str(), "c-3");
    }

    #[test]
    fn parse_recipe_with_minimal_fields() {
        let json = r#"{
            "id": 1,
            "slug": "chocolate-cake",
            "title": "Chocolate Cake",
            "categoryId": 2,
            "authorId": "a1",
            "createdAt": "2024-03-10T08:30:00Z",
            "difficulty": "medium",
            "published": true
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.slug, "chocolate-cake");
        assert_eq!(recipe.category_id.as_str(), "2");
        assert_eq!(recipe.difficulty, Difficulty::Medium);
        assert!(recipe.tags.is_empty());
        assert_eq!(recipe.seo.title, "");
    }

    #[test]
    fn unpublished_defaults_to_false() {
        let json = r#"{"id": 1, "slug": "s", "title": "T", "categoryId": 1,
            "authorId": 1, "createdAt": "2024-01-01", "difficulty": "easy"}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert!(!recipe.published);
    }

    #[test]
    fn date_only_timestamp_is_midnight_utc() {
        let ts = parse_timestamp("2024-01-15").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn offset_timestamp_converts_to_utc() {
        let ts = parse_timestamp("2024-01-15T10:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap());
    }

    #[test]
    fn garbage_timestamp_rejected() {
        assert!(parse_timestamp("last tuesday").is_none());
        let json = r#"{"id": 1, "slug": "s", "title": "T", "categoryId": 1,
            "authorId": 1, "createdAt": "soon", "difficulty": "easy"}"#;
        assert!(serde_json::from_str::<Recipe>(json).is_err());
    }

    #[test]
    fn unknown_difficulty_kept_verbatim() {
        let difficulty: Difficulty = serde_json::from_str(r#""Expert""#).unwrap();
        assert_eq!(difficulty, Difficulty::Other("Expert".to_string()));
        assert_eq!(difficulty.as_str(), "Expert");
        assert_eq!(difficulty.label(), "Expert");
        assert!(!difficulty.is_known());
        assert_eq!(serde_json::to_string(&difficulty).unwrap(), r#""Expert""#);
    }

    #[test]
    fn known_difficulty_ignores_case() {
        let difficulty: Difficulty = serde_json::from_str(r#""Hard""#).unwrap();
        assert_eq!(difficulty, Difficulty::Hard);
    }

    #[test]
    fn recipe_with_unknown_difficulty_parses() {
        let json = r#"{"id": 1, "slug": "s", "title": "T", "categoryId": 1,
            "authorId": 1, "createdAt": "2024-01-01", "difficulty": "Expert"}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.difficulty.label(), "Expert");
    }

    #[test]
    fn difficulty_wire_and_label() {
        assert_eq!(Difficulty::Hard.as_str(), "hard");
        assert_eq!(Difficulty::Hard.label(), "Hard");
    }

    #[test]
    fn page_size_defaults_when_zero_or_missing() {
        let site: SiteConfig = serde_json::from_str(r#"{"siteName": "Kitchen"}"#).unwrap();
        assert_eq!(site.page_size(), DEFAULT_ITEMS_PER_PAGE);

        let site: SiteConfig =
            serde_json::from_str(r#"{"siteName": "Kitchen", "itemsPerPage": 6}"#).unwrap();
        assert_eq!(site.page_size(), 6);
    }

    #[test]
    fn site_config_ignores_unknown_fields() {
        let site: SiteConfig =
            serde_json::from_str(r#"{"siteName": "Kitchen", "theme": "dark"}"#).unwrap();
        assert_eq!(site.site_name, "Kitchen");
        assert!(site.description.is_none());
    }
}

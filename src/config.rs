//! Tool configuration.
//!
//! Handles loading, validating, and merging `recipe-press.toml`. The file is
//! optional; every key has a stock default and a user file only needs the
//! values it wants to override. This is separate from the site's own
//! `site_config.json`, which is part of the published dataset (see
//! [`crate::types::SiteConfig`]).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! origin = "http://localhost:8000"  # Used to make SEO and JSON-LD URLs absolute
//! data_dir = "data"                 # Directory holding the four JSON documents
//!
//! [routing]
//! root_marker = "public"            # Paths containing /public/ resolve to home
//!
//! [display]
//! card_tag_limit = 3                # Tags shown on a recipe card
//! tag_cloud_limit = 15              # Entries in a category tag cloud
//! related_limit = 3                 # Related recipes/categories/authors
//! author_bio_chars = 100            # Author bios on the home page
//! featured_bio_chars = 80           # Author bios on category/author pages
//! category_description_chars = 60   # Related category descriptions
//! default_avatar = "/assets/images/default-avatar.jpg"
//!
//! [logging]
//! level = "info"                    # trace | debug | info | warn | error
//! format = "compact"                # compact | json
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use url::Url;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "recipe-press.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `recipe-press.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PressConfig {
    /// Site origin (`scheme://host[:port]`) used for absolute URLs.
    pub origin: String,
    /// Directory holding the dataset's JSON documents.
    pub data_dir: String,
    /// URL routing settings.
    pub routing: RoutingConfig,
    /// Limits and placeholders for synthesized render models.
    pub display: DisplayConfig,
    /// Log level and output format for the CLI.
    pub logging: LoggingConfig,
}

impl Default for PressConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:8000".to_string(),
            data_dir: "data".to_string(),
            routing: RoutingConfig::default(),
            display: DisplayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl PressConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.origin_url()?;
        if self.routing.root_marker.is_empty() || self.routing.root_marker.contains('/') {
            return Err(ConfigError::Validation(
                "routing.root_marker must be a single non-empty path segment".into(),
            ));
        }
        let limits = [
            ("display.card_tag_limit", self.display.card_tag_limit),
            ("display.tag_cloud_limit", self.display.tag_cloud_limit),
            ("display.related_limit", self.display.related_limit),
            ("display.author_bio_chars", self.display.author_bio_chars),
            ("display.featured_bio_chars", self.display.featured_bio_chars),
            (
                "display.category_description_chars",
                self.display.category_description_chars,
            ),
        ];
        for (key, value) in limits {
            if value == 0 {
                return Err(ConfigError::Validation(format!("{key} must be non-zero")));
            }
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    /// The origin parsed as a URL. Must be absolute http(s).
    pub fn origin_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.origin)
            .map_err(|e| ConfigError::Validation(format!("origin '{}': {e}", self.origin)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "origin '{}' must use http or https",
                self.origin
            )));
        }
        Ok(url)
    }
}

/// URL routing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutingConfig {
    /// Path segment that marks the site root when the site is hosted in a
    /// subdirectory (`/public/` or a path ending in `/public`).
    pub root_marker: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            root_marker: "public".to_string(),
        }
    }
}

/// Limits and placeholders used by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Tags shown on a recipe card before collapsing into `+N`.
    pub card_tag_limit: usize,
    /// Maximum entries in a tag cloud.
    pub tag_cloud_limit: usize,
    /// Maximum related recipes, categories, or authors.
    pub related_limit: usize,
    /// Author bio length on home-page author cards.
    pub author_bio_chars: usize,
    /// Author bio length on category and author pages.
    pub featured_bio_chars: usize,
    /// Description length on related-category cards.
    pub category_description_chars: usize,
    /// Avatar used when a recipe's author cannot be resolved.
    pub default_avatar: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            card_tag_limit: 3,
            tag_cloud_limit: 15,
            related_limit: 3,
            author_bio_chars: 100,
            featured_bio_chars: 80,
            category_description_chars: 60,
            default_avatar: "/assets/images/default-avatar.jpg".to_string(),
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Logging settings. `RUST_LOG` overrides `level` when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(PressConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<PressConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: PressConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file.
///
/// A missing file yields the stock defaults. Otherwise merges user values on
/// top of stock defaults, rejects unknown keys, and validates the result.
pub fn load_config(path: &Path) -> Result<PressConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `recipe-press.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# recipe-press configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Site origin, used to turn relative image and page paths into absolute
# URLs for SEO meta tags and JSON-LD structured data.
origin = "http://localhost:8000"

# Directory holding site_config.json, recipes.json, categories.json
# and authors.json.
data_dir = "data"

# ---------------------------------------------------------------------------
# Routing
# ---------------------------------------------------------------------------
[routing]
# When the site is hosted in a subdirectory, any path containing this
# segment (/public/ or ending in /public) is treated as the home page.
root_marker = "public"

# ---------------------------------------------------------------------------
# Display limits
# ---------------------------------------------------------------------------
[display]
# Tags shown on a recipe card; the rest collapse into "+N".
card_tag_limit = 3

# Entries in a category's tag cloud.
tag_cloud_limit = 15

# Related recipes, categories and authors shown on detail pages.
related_limit = 3

# Bio length (characters) for author cards on the home page.
author_bio_chars = 100

# Bio length (characters) for author cards on category and author pages.
featured_bio_chars = 80

# Description length (characters) for related category cards.
category_description_chars = 60

# Avatar shown when a recipe's author cannot be found.
default_avatar = "/assets/images/default-avatar.jpg"

# ---------------------------------------------------------------------------
# Logging (RUST_LOG overrides level when set)
# ---------------------------------------------------------------------------
[logging]
# trace | debug | info | warn | error
level = "info"

# compact | json
format = "compact"
"##
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        let config = PressConfig::default();
        config.validate().unwrap();
        assert_eq!(config.display.card_tag_limit, 3);
        assert_eq!(config.display.tag_cloud_limit, 15);
        assert_eq!(config.routing.root_marker, "public");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
origin = "https://recipes.example.com"

[display]
related_limit = 4
"#;
        let config: PressConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.origin, "https://recipes.example.com");
        assert_eq!(config.display.related_limit, 4);
        // Unspecified values keep defaults
        assert_eq!(config.display.card_tag_limit, 3);
        assert_eq!(config.data_dir, "data");
    }

    #[test]
    fn unknown_keys_rejected() {
        let toml = r#"
[display]
card_tags = 3
"#;
        let result: Result<PressConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.origin, "http://localhost:8000");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
data_dir = "site/data"

[logging]
format = "json"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.data_dir, "site/data");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "this is not valid toml [[[").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn relative_origin_is_validation_error() {
        let config = PressConfig {
            origin: "/just/a/path".to_string(),
            ..PressConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn non_http_origin_is_validation_error() {
        let config = PressConfig {
            origin: "ftp://example.com".to_string(),
            ..PressConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn zero_limit_is_validation_error() {
        let mut config = PressConfig::default();
        config.display.tag_cloud_limit = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("display.tag_cloud_limit"));
    }

    #[test]
    fn root_marker_must_be_single_segment() {
        let mut config = PressConfig::default();
        config.routing.root_marker = "site/public".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_log_level_is_validation_error() {
        let mut config = PressConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn origin_url_parses() {
        let config = PressConfig::default();
        let url = config.origin_url().unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
        assert_eq!(url.port(), Some(8000));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"a = 1"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"a = 2"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(2));
    }

    #[test]
    fn merge_toml_table_merge_preserves_base_keys() {
        let base: toml::Value = toml::from_str(
            r#"
[display]
card_tag_limit = 3
related_limit = 3
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[display]
related_limit = 5
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let display = merged.get("display").unwrap();
        assert_eq!(display.get("card_tag_limit").unwrap().as_integer(), Some(3));
        assert_eq!(display.get("related_limit").unwrap().as_integer(), Some(5));
    }

    #[test]
    fn resolve_config_applies_overlay_and_validates() {
        let overlay: toml::Value = toml::from_str(
            r#"
[display]
related_limit = 0
"#,
        )
        .unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: PressConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = PressConfig::default();
        assert_eq!(config.origin, defaults.origin);
        assert_eq!(config.data_dir, defaults.data_dir);
        assert_eq!(config.display.default_avatar, defaults.display.default_avatar);
        assert_eq!(
            config.display.category_description_chars,
            defaults.display.category_description_chars
        );
        assert_eq!(config.logging.format, defaults.logging.format);
    }
}

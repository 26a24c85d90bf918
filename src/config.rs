//! Site configuration module.
//!
//! Handles loading, validating, and merging a `config.toml` file. Stock
//! defaults are the base layer; the user's file only needs the keys it wants
//! to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "NewsHub"
//!
//! [fetch]
//! listing_delay_ms = 1000   # Simulated fetch delay of the home page
//! category_delay_ms = 600   # ... of category pages
//! detail_delay_ms = 800     # ... of article pages
//!
//! [browse]
//! categories = ["Technology", "Business", "Science", "Health", "Sports", "Entertainment"]
//!
//! [content]
//! allowed_tags = ["p", "h2", "h3", "ul", "ol", "li", "a", "em", "strong", ...]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::view::PageKind;

/// Tags that execute or embed foreign content. Never allowed in article bodies.
pub const FORBIDDEN_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "frame", "frameset", "template", "noscript",
    "form", "input", "button", "textarea", "select", "link", "meta", "base", "svg", "math",
];

/// Upper bound for a simulated delay.
const MAX_DELAY_MS: u64 = 60_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity shown in the header and page titles.
    pub site: SiteSection,
    /// Simulated fetch delays per page.
    pub fetch: FetchConfig,
    /// Category shortcuts on the home page.
    pub browse: BrowseConfig,
    /// Article body sanitization.
    pub content: ContentConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.title must not be empty".into(),
            ));
        }
        for (key, ms) in [
            ("listing_delay_ms", self.fetch.listing_delay_ms),
            ("category_delay_ms", self.fetch.category_delay_ms),
            ("detail_delay_ms", self.fetch.detail_delay_ms),
        ] {
            if ms > MAX_DELAY_MS {
                return Err(ConfigError::Validation(format!(
                    "fetch.{key} must be at most {MAX_DELAY_MS}"
                )));
            }
        }
        if self.browse.categories.is_empty() {
            return Err(ConfigError::Validation(
                "browse.categories must not be empty".into(),
            ));
        }
        if self.browse.categories.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "browse.categories must not contain blank names".into(),
            ));
        }
        if let Some(tag) = self
            .content
            .allowed_tags
            .iter()
            .find(|t| FORBIDDEN_TAGS.contains(&t.to_ascii_lowercase().as_str()))
        {
            return Err(ConfigError::Validation(format!(
                "content.allowed_tags must not contain '{tag}'"
            )));
        }
        Ok(())
    }

    /// Zero every simulated delay. Used by `--no-delay` and static builds.
    pub fn without_delays(mut self) -> Self {
        self.fetch = FetchConfig::immediate();
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    pub title: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "NewsHub".to_string(),
        }
    }
}

/// Simulated network delay of each page's fetch, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    pub listing_delay_ms: u64,
    pub category_delay_ms: u64,
    pub detail_delay_ms: u64,
}

impl FetchConfig {
    pub fn immediate() -> Self {
        Self {
            listing_delay_ms: 0,
            category_delay_ms: 0,
            detail_delay_ms: 0,
        }
    }

    /// Delay applied before a page of the given kind resolves.
    pub fn delay_for(&self, page: PageKind) -> Duration {
        let ms = match page {
            PageKind::Listing => self.listing_delay_ms,
            PageKind::Category => self.category_delay_ms,
            PageKind::Detail => self.detail_delay_ms,
        };
        Duration::from_millis(ms)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            listing_delay_ms: 1000,
            category_delay_ms: 600,
            detail_delay_ms: 800,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowseConfig {
    /// Display names, linked as `/category/{lowercase name}`.
    pub categories: Vec<String>,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            categories: [
                "Technology",
                "Business",
                "Science",
                "Health",
                "Sports",
                "Entertainment",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Tags kept in article bodies. Everything else is unwrapped or dropped.
    pub allowed_tags: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            allowed_tags: [
                "p", "br", "hr", "h2", "h3", "h4", "blockquote", "ul", "ol", "li", "a", "em",
                "strong", "b", "i", "code", "pre", "figure", "figcaption", "img",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
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

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file.
///
/// A missing file yields the stock defaults. A file that exists but does not
/// parse, has unknown keys, or fails validation is an error.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        return resolve_config(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple News Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Shown in the header and in every page title.
title = "NewsHub"

# ---------------------------------------------------------------------------
# Simulated fetch delays (milliseconds, at most 60000)
# ---------------------------------------------------------------------------
[fetch]
listing_delay_ms = 1000
category_delay_ms = 600
detail_delay_ms = 800

# ---------------------------------------------------------------------------
# Home page category shortcuts
# ---------------------------------------------------------------------------
[browse]
# Each name links to /category/<lowercase name>.
categories = ["Technology", "Business", "Science", "Health", "Sports", "Entertainment"]

# ---------------------------------------------------------------------------
# Article body sanitization
# ---------------------------------------------------------------------------
[content]
# Tags kept in article bodies. Other tags are unwrapped (their text is kept);
# script, style, iframe and other active content is always removed.
allowed_tags = [
    "p", "br", "hr", "h2", "h3", "h4", "blockquote", "ul", "ol", "li", "a", "em",
    "strong", "b", "i", "code", "pre", "figure", "figcaption", "img",
]
"##
}

//! Shared types used across the store, the view controllers and the renderers.
//!
//! Articles are deserialized from the dataset JSON, which uses the camelCase
//! keys of the upstream feed (`publishedAt`, `readTime`).

use crate::route::Route;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single news item.
///
/// Every text field defaults to empty so a sparse record still renders:
/// missing fields show up as blank text rather than failing the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Opaque identifier, unique within a store.
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// HTML fragment. Untrusted: always goes through [`crate::sanitize`].
    #[serde(default)]
    pub content: String,
    /// URI of the display image.
    #[serde(default)]
    pub image: String,
    /// Display label and filter key (matched case-insensitively).
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<NaiveDate>,
    /// Estimated reading time in minutes, kept as the feed's text.
    #[serde(default)]
    pub read_time: String,
}

impl Article {
    /// Case-insensitive category match.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }

    /// Publication date as `YYYY-MM-DD`, empty when unknown.
    pub fn published_label(&self) -> String {
        self.published_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// `"5 min read"`, or empty when the feed has no estimate.
    pub fn read_time_label(&self) -> String {
        let minutes = self.read_time.trim();
        if minutes.is_empty() {
            String::new()
        } else {
            format!("{minutes} min read")
        }
    }

    /// Site-relative URL of the article page.
    pub fn href(&self) -> String {
        Route::Article(self.id.clone()).path()
    }
}

/// Path segment for a category: `"Technology"` → `"technology"`.
pub fn category_slug(category: &str) -> String {
    category.trim().to_lowercase()
}

/// Display name for a category taken from a URL: `"technology"` → `"Technology"`.
///
/// Only the first character changes; the rest is kept as given.
pub fn category_title(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_feed_keys() {
        let json = r#"{
            "id": "7",
            "title": "Title",
            "category": "Science",
            "publishedAt": "2024-02-01",
            "readTime": "3"
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.id, "7");
        assert_eq!(article.published_at, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(article.read_time, "3");
        // Missing fields default to empty
        assert_eq!(article.author, "");
        assert_eq!(article.content, "");
    }

    #[test]
    fn category_match_ignores_case() {
        let article = Article {
            id: "1".into(),
            title: String::new(),
            description: String::new(),
            content: String::new(),
            image: String::new(),
            category: "Technology".into(),
            author: String::new(),
            published_at: None,
            read_time: String::new(),
        };
        assert!(article.in_category("technology"));
        assert!(article.in_category("TECHNOLOGY"));
        assert!(!article.in_category("tech"));
    }

    #[test]
    fn labels_render_empty_when_missing() {
        let article: Article = serde_json::from_str(r#"{"id": "1"}"#).unwrap();
        assert_eq!(article.published_label(), "");
        assert_eq!(article.read_time_label(), "");
    }

    #[test]
    fn read_time_label_formats_minutes() {
        let article: Article = serde_json::from_str(r#"{"id": "1", "readTime": "5"}"#).unwrap();
        assert_eq!(article.read_time_label(), "5 min read");
        assert_eq!(article.href(), "/article/1");
    }

    #[test]
    fn category_title_uppercases_first_letter_only() {
        assert_eq!(category_title("technology"), "Technology");
        assert_eq!(category_title("wORLD"), "WORLD");
        assert_eq!(category_title(""), "");
    }

    #[test]
    fn category_slug_lowercases() {
        assert_eq!(category_slug("Technology"), "technology");
        assert_eq!(category_slug(" Health "), "health");
    }
}

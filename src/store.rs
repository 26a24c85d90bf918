//! Read-only article collection.
//!
//! The store owns an immutable snapshot of articles handed to it at
//! construction. Nothing is module-global: the bundled sample dataset, a JSON
//! file and test fixtures all go through the same constructor, so any caller
//! can substitute its own data.
//!
//! All queries are linear scans. The dataset is a handful of records and the
//! order of the source is the order of every result.

use crate::types::Article;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

const SAMPLE_JSON: &str = include_str!("../static/articles.json");

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("article not found: {id}")]
    NotFound { id: String },
    #[error("duplicate article id: {id}")]
    DuplicateId { id: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable, cheaply clonable collection of articles.
#[derive(Debug, Clone)]
pub struct ArticleStore {
    articles: Arc<[Article]>,
}

impl ArticleStore {
    /// Build a store from an owned list. Rejects duplicate ids.
    pub fn new(articles: Vec<Article>) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        for article in &articles {
            if !seen.insert(article.id.as_str()) {
                return Err(StoreError::DuplicateId {
                    id: article.id.clone(),
                });
            }
        }
        Ok(Self {
            articles: articles.into(),
        })
    }

    /// The six-article dataset bundled with the binary.
    pub fn sample() -> Self {
        Self::from_json_str(SAMPLE_JSON).expect("bundled dataset must parse")
    }

    /// Parse a JSON array of articles.
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let articles: Vec<Article> = serde_json::from_str(json)?;
        Self::new(articles)
    }

    /// Load a JSON array of articles from disk.
    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path)?;
        let store = Self::from_json_str(&content)?;
        info!(path = %path.display(), articles = store.len(), "loaded article dataset");
        Ok(store)
    }

    /// Every article, in source order.
    pub fn get_all(&self) -> &[Article] {
        &self.articles
    }

    pub fn get_by_id(&self, id: &str) -> Result<&Article, StoreError> {
        self.articles
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    /// Articles whose category equals `category`, ignoring case.
    ///
    /// An unknown category is an empty result, not an error.
    pub fn get_by_category(&self, category: &str) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|a| a.in_category(category))
            .collect()
    }

    /// Other articles in the same category as `article`.
    pub fn get_related(&self, article: &Article) -> Vec<&Article> {
        self.get_by_category(&article.category)
            .into_iter()
            .filter(|a| a.id != article.id)
            .collect()
    }

    /// Distinct categories in first-seen order, with their original casing.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.articles
            .iter()
            .filter(|a| seen.insert(a.category.to_lowercase()))
            .map(|a| a.category.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn sample_has_six_articles_in_order() {
        let store = ArticleStore::sample();
        let ids: Vec<&str> = store.get_all().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn get_by_id_finds_every_present_id() {
        let store = ArticleStore::sample();
        for article in store.get_all() {
            assert_eq!(store.get_by_id(&article.id).unwrap(), article);
        }
    }

    #[test]
    fn get_by_id_missing_is_not_found() {
        let store = ArticleStore::sample();
        let err = store.get_by_id("999").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { ref id } if id == "999"));
    }

    #[test]
    fn get_by_category_is_case_insensitive_subset() {
        let store = ArticleStore::sample();
        for query in ["technology", "Technology", "TECHNOLOGY"] {
            let ids: Vec<&str> = store
                .get_by_category(query)
                .iter()
                .map(|a| a.id.as_str())
                .collect();
            assert_eq!(ids, ["1", "6"]);
        }
    }

    #[test]
    fn get_by_category_matches_manual_filter_for_every_category() {
        let store = ArticleStore::sample();
        for category in ["technology", "business", "science", "health", "sports", "travel"] {
            let expected: Vec<&Article> = store
                .get_all()
                .iter()
                .filter(|a| a.category.eq_ignore_ascii_case(category))
                .collect();
            assert_eq!(store.get_by_category(category), expected);
            // Idempotent
            assert_eq!(store.get_by_category(category), store.get_by_category(category));
        }
    }

    #[test]
    fn get_by_category_unknown_is_empty() {
        let store = ArticleStore::sample();
        assert!(store.get_by_category("entertainment").is_empty());
    }

    #[test]
    fn get_related_excludes_self_and_other_categories() {
        let store = ArticleStore::sample();
        let article = store.get_by_id("1").unwrap();
        let related = store.get_related(article);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id, "6");

        for article in store.get_all() {
            for other in store.get_related(article) {
                assert_ne!(other.id, article.id);
                assert!(other.in_category(&article.category));
            }
        }
    }

    #[test]
    fn get_related_empty_for_single_article_category() {
        let store = ArticleStore::sample();
        let business = store.get_by_id("2").unwrap();
        assert!(store.get_related(business).is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = ArticleStore::new(vec![
            article("1", "Science"),
            article("1", "Health"),
        ]);
        assert!(matches!(result, Err(StoreError::DuplicateId { ref id }) if id == "1"));
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        let store = ArticleStore::sample();
        assert_eq!(
            store.categories(),
            ["Technology", "Business", "Science", "Health", "Sports"]
        );
    }

    #[test]
    fn from_json_file_reads_dataset() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("articles.json");
        fs::write(&path, r#"[{"id": "a", "category": "World"}]"#).unwrap();

        let store = ArticleStore::from_json_file(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_by_category("world").len(), 1);
    }

    #[test]
    fn from_json_str_invalid_is_error() {
        let result = ArticleStore::from_json_str("not json");
        assert!(matches!(result, Err(StoreError::Json(_))));
    }
}

//! Shared test utilities: article builders and fixture stores.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let store = store_of(&[("1", "Technology"), ("2", "Business")]);
//! let article = find_article(&store, "2");
//! assert_eq!(article.category, "Business");
//! ```

use crate::store::ArticleStore;
use crate::types::Article;
use chrono::NaiveDate;

/// Build a fully populated article with a predictable title.
pub fn article(id: &str, category: &str) -> Article {
    Article {
        id: id.to_string(),
        title: format!("Article {id}"),
        description: format!("Description of article {id}"),
        content: format!("<p>Body of article {id}</p>"),
        image: format!("https://img.example.com/{id}.jpg"),
        category: category.to_string(),
        author: "Test Author".to_string(),
        published_at: NaiveDate::from_ymd_opt(2024, 1, 1),
        read_time: "4".to_string(),
    }
}

/// Store built from `(id, category)` pairs, in the given order.
pub fn store_of(entries: &[(&str, &str)]) -> ArticleStore {
    let articles = entries
        .iter()
        .map(|(id, category)| article(id, category))
        .collect();
    ArticleStore::new(articles).unwrap()
}

/// A small dataset with no Sports coverage.
pub fn fixture_without_sports() -> ArticleStore {
    store_of(&[
        ("1", "Technology"),
        ("2", "Business"),
        ("3", "Technology"),
        ("4", "Health"),
    ])
}

/// Find an article by id. Panics with the available ids on miss.
pub fn find_article<'a>(store: &'a ArticleStore, id: &str) -> &'a Article {
    store.get_by_id(id).unwrap_or_else(|_| {
        let ids: Vec<&str> = store.get_all().iter().map(|a| a.id.as_str()).collect();
        panic!("article '{id}' not found. Available: {ids:?}")
    })
}

/// Ids of a list of articles, for compact assertions.
pub fn ids<'a, I>(articles: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Article>,
{
    articles.into_iter().map(|a| a.id.clone()).collect()
}

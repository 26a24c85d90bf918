//! CLI output formatting.
//!
//! Output is information-first: every entity leads with a positional index
//! and its title, with ids, paths and metadata as indented context lines.
//!
//! ## List
//!
//! ```text
//! Technology (2 articles)
//!     001 The Future of Artificial Intelligence in Healthcare
//!         Id: 1
//!         Dr. Sarah Johnson · 2024-01-15 · 5 min read
//!         Artificial Intelligence is transforming healthcare in unprecedented...
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//!
//! Categories
//! 001 technology → category/technology/index.html
//! 006 entertainment → category/entertainment/index.html (no articles)
//!
//! Articles
//! 001 The Future of ... → article/1/index.html
//!
//! Generated 13 pages (1 error page)
//! ```
//!
//! Each `format_*` function returns lines for testability; the `print_*`
//! wrappers write them to stdout.

use crate::config::SiteConfig;
use crate::route::Route;
use crate::site::BuildReport;
use crate::store::ArticleStore;
use crate::types::category_slug;
use scraper::Html;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Text content of an HTML fragment with entities decoded. Text nodes are
/// joined with spaces so adjacent blocks do not run together.
fn html_text(html: &str) -> String {
    Html::parse_fragment(html)
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapse whitespace and truncate to `max` characters, appending `...`.
fn preview(text: &str, max: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max {
        collapsed
    } else {
        let cut: String = collapsed.chars().take(max).collect();
        format!("{}...", cut.trim_end())
    }
}

// ============================================================================
// list
// ============================================================================

/// Articles grouped by category, categories in first-seen order.
pub fn format_inventory(store: &ArticleStore) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, category) in store.categories().into_iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        let articles = store.get_by_category(category);
        lines.push(format!("{} ({})", category, plural(articles.len(), "article")));

        for (pos, article) in articles.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(pos + 1), article.title));
            lines.push(format!("{}Id: {}", indent(2), article.id));

            let meta: Vec<String> = [
                article.author.clone(),
                article.published_label(),
                article.read_time_label(),
            ]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
            if !meta.is_empty() {
                lines.push(format!("{}{}", indent(2), meta.join(" · ")));
            }

            let body = preview(&html_text(&article.content), 70);
            if !body.is_empty() {
                lines.push(format!("{}{}", indent(2), body));
            }
        }
    }

    lines
}

pub fn print_inventory(store: &ArticleStore) {
    for line in format_inventory(store) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// Dataset summary plus mismatches between the dataset and the browse list.
pub fn format_check_output(store: &ArticleStore, config: &SiteConfig) -> Vec<String> {
    let categories = store.categories();
    let mut lines = vec![
        format!("Articles: {}", store.len()),
        format!("Categories: {}", categories.join(", ")),
    ];

    for browse in &config.browse.categories {
        if store.get_by_category(browse).is_empty() {
            lines.push(format!(
                "{}Browse category '{}' has no articles (its page shows an error)",
                indent(1),
                browse
            ));
        }
    }
    for category in categories {
        let listed = config
            .browse
            .categories
            .iter()
            .any(|b| category_slug(b) == category_slug(category));
        if !listed {
            lines.push(format!(
                "{}Category '{}' is not in the browse list (reachable by URL only)",
                indent(1),
                category
            ));
        }
    }

    lines
}

pub fn print_check_output(store: &ArticleStore, config: &SiteConfig) {
    for line in format_check_output(store, config) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

pub fn format_build_output(report: &BuildReport, store: &ArticleStore) -> Vec<String> {
    let mut lines = Vec::new();
    let mut categories = Vec::new();
    let mut articles = Vec::new();

    for page in &report.pages {
        let suffix = if page.failed {
            match &page.route {
                Route::Category(_) => " (no articles)",
                _ => " (error page)",
            }
        } else {
            ""
        };
        match &page.route {
            Route::Home => {
                lines.push(format!("Home → {}{}", page.file.display(), suffix));
            }
            Route::Category(category) => categories.push(format!(
                "{} {} → {}{}",
                format_index(categories.len() + 1),
                category,
                page.file.display(),
                suffix
            )),
            Route::Article(id) => {
                let title = store
                    .get_by_id(id)
                    .map(|a| a.title.as_str())
                    .unwrap_or(id.as_str());
                articles.push(format!(
                    "{} {} → {}{}",
                    format_index(articles.len() + 1),
                    title,
                    page.file.display(),
                    suffix
                ));
            }
        }
    }

    if !categories.is_empty() {
        lines.push(String::new());
        lines.push("Categories".to_string());
        lines.extend(categories);
    }
    if !articles.is_empty() {
        lines.push(String::new());
        lines.push("Articles".to_string());
        lines.extend(articles);
    }

    let failed = report.failed().count();
    lines.push(String::new());
    if failed == 0 {
        lines.push(format!("Generated {}", plural(report.pages.len(), "page")));
    } else {
        lines.push(format!(
            "Generated {} ({})",
            plural(report.pages.len(), "page"),
            plural(failed, "error page")
        ));
    }
    lines
}

pub fn print_build_output(report: &BuildReport, store: &ArticleStore) {
    for line in format_build_output(report, store) {
        println!("{}", line);
    }
}

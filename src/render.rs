//! HTML rendering.
//!
//! Turns view states into complete HTML documents. Uses
//! [maud](https://maud.lambda.xyz/) for compile-time templating: every
//! interpolated string is escaped, so article titles, descriptions and
//! category names from the dataset cannot inject markup. The one exception is
//! the article body, which is HTML by nature; it goes through
//! [`Sanitizer`] first and is embedded with `PreEscaped`.
//!
//! ## Pages
//!
//! - **Home** (`/`): featured article, latest news grid, category shortcuts
//! - **Category** (`/category/{category}`): grid of matching articles
//! - **Article** (`/article/{id}`): full article plus related articles
//!
//! Each page renders all three view states: a loading indicator, an error
//! message with a way back home, or the data.
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time and inlined into every page.

use crate::config::SiteConfig;
use crate::route::Route;
use crate::sanitize::Sanitizer;
use crate::types::{Article, category_slug, category_title};
use crate::view::{ArticleView, CategoryListing, Listing, LoadError, PageKind, ViewState};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use tracing::warn;

const CSS: &str = include_str!("../static/style.css");

/// How much emphasis a card gets. Carries no data difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLayout {
    /// Wide card with a tall image and a large headline.
    Featured,
    Standard,
}

impl CardLayout {
    fn card_class(self) -> &'static str {
        match self {
            CardLayout::Featured => "card card-featured",
            CardLayout::Standard => "card",
        }
    }

    fn image_class(self) -> &'static str {
        match self {
            CardLayout::Featured => "card-image card-image-tall",
            CardLayout::Standard => "card-image",
        }
    }

    fn title_class(self) -> &'static str {
        match self {
            CardLayout::Featured => "card-title card-title-large",
            CardLayout::Standard => "card-title",
        }
    }

    fn name(self) -> &'static str {
        match self {
            CardLayout::Featured => "featured",
            CardLayout::Standard => "standard",
        }
    }
}

/// User-facing wording for a failed page.
pub fn failure_message(page: PageKind, err: &LoadError) -> String {
    match (page, err) {
        (_, LoadError::NotFound { .. }) => "Article not found".to_string(),
        (_, LoadError::EmptyCategory { category }) => {
            format!("No articles found for category: {category}")
        }
        (PageKind::Detail, LoadError::LoadFailure) => "Failed to load article".to_string(),
        (_, LoadError::LoadFailure) => "Failed to load articles".to_string(),
    }
}

// ============================================================================
// Components
// ============================================================================

/// Renders one article summary linking to its page.
pub fn render_card(article: &Article, layout: CardLayout) -> Markup {
    html! {
        article class=(layout.card_class()) data-layout=(layout.name()) {
            a.card-link href=(article.href()) {
                div.card-media {
                    img class=(layout.image_class()) src=(article.image) alt=(article.title) loading="lazy";
                    span.badge { (article.category) }
                }
                div.card-body {
                    h3 class=(layout.title_class()) { (article.title) }
                    p.card-description { (article.description) }
                    (article_meta(article))
                }
            }
        }
    }
}

/// Renders a full article followed by its related articles, if any.
pub fn render_article_detail(
    article: &Article,
    related: &[Article],
    sanitizer: &Sanitizer,
) -> Markup {
    let body = sanitizer.sanitize(&article.content);
    if body.stripped > 0 {
        warn!(
            article = %article.id,
            stripped = body.stripped,
            "removed disallowed markup from article body"
        );
    }

    html! {
        div.article-page {
            a.back-link href="/" { "← Back to News" }
            header.article-header {
                span.badge { (article.category) }
                h1.article-title { (article.title) }
                p.article-lede { (article.description) }
                (article_meta(article))
            }
            figure.article-image {
                img src=(article.image) alt=(article.title);
            }
            article.article-body {
                (PreEscaped(body.html))
            }
            @if !related.is_empty() {
                section.related {
                    h2 { "Related Articles" }
                    div.card-grid {
                        @for other in related {
                            (render_card(other, CardLayout::Standard))
                        }
                    }
                }
            }
        }
    }
}

fn article_meta(article: &Article) -> Markup {
    html! {
        div.meta {
            span.meta-author { (article.author) }
            span.meta-date { (article.published_label()) }
            span.meta-read-time { (article.read_time_label()) }
        }
    }
}

fn loading_block(label: &str) -> Markup {
    html! {
        div.status.status-loading role="status" {
            span.spinner {}
            span { (label) }
        }
    }
}

fn failure_block(message: &str, action_label: &str) -> Markup {
    html! {
        div.status.status-failed role="alert" {
            div.error-message { (message) }
            a.button href="/" { (action_label) }
        }
    }
}

// ============================================================================
// Page renderers
// ============================================================================

/// Page chrome shared by every page: site title, navigation, styles and
/// the body sanitizer.
#[derive(Debug, Clone)]
pub struct Renderer {
    site_title: String,
    categories: Vec<String>,
    sanitizer: Sanitizer,
}

impl Renderer {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            site_title: config.site.title.clone(),
            categories: config.browse.categories.clone(),
            sanitizer: Sanitizer::new(&config.content),
        }
    }

    pub fn render_listing_page(&self, state: &ViewState<Listing>) -> Markup {
        let content = match state {
            ViewState::Loading => loading_block("Loading articles..."),
            ViewState::Failed(err) => {
                failure_block(&failure_message(PageKind::Listing, err), "Try Again")
            }
            ViewState::Ready(listing) => html! {
                section.featured {
                    h2 { "Featured Article" }
                    (render_card(&listing.featured, CardLayout::Featured))
                }
                section.latest {
                    h2 { "Latest News" }
                    div.card-grid {
                        @for article in &listing.latest {
                            (render_card(article, CardLayout::Standard))
                        }
                    }
                }
                section.browse {
                    h2 { "Browse by Category" }
                    div.category-grid {
                        @for category in &self.categories {
                            a.category-tile href=(Route::Category(category_slug(category)).path()) {
                                h3 { (category) }
                            }
                        }
                    }
                }
            },
        };
        self.document(&self.site_title, None, content)
    }

    pub fn render_category_page(&self, state: &ViewState<CategoryListing>) -> Markup {
        match state {
            ViewState::Loading => {
                self.document(&self.site_title, None, loading_block("Loading articles..."))
            }
            ViewState::Failed(err) => {
                let current = match err {
                    LoadError::EmptyCategory { category } => Some(category.as_str()),
                    _ => None,
                };
                let content = failure_block(&failure_message(PageKind::Category, err), "Back to Home");
                self.document(&self.site_title, current, content)
            }
            ViewState::Ready(listing) => {
                let heading = format!("{} News", category_title(&listing.category));
                let count = listing.articles.len();
                let content = html! {
                    a.back-link href="/" { "← Back to News" }
                    header.category-header {
                        h1 { (heading) }
                        p.category-count {
                            (count) " article" @if count != 1 { "s" } " found"
                        }
                    }
                    div.card-grid {
                        @for article in &listing.articles {
                            (render_card(article, CardLayout::Standard))
                        }
                    }
                };
                self.document(&heading, Some(&listing.category), content)
            }
        }
    }

    pub fn render_detail_page(&self, state: &ViewState<ArticleView>) -> Markup {
        match state {
            ViewState::Loading => {
                self.document(&self.site_title, None, loading_block("Loading article..."))
            }
            ViewState::Failed(err) => self.document(
                &self.site_title,
                None,
                failure_block(&failure_message(PageKind::Detail, err), "Back to Home"),
            ),
            ViewState::Ready(view) => self.document(
                &view.article.title,
                Some(&view.article.category),
                render_article_detail(&view.article, &view.related, &self.sanitizer),
            ),
        }
    }

    /// Renders the base HTML document around `content`.
    fn document(&self, title: &str, current_category: Option<&str>, content: Markup) -> Markup {
        let full_title = if title == self.site_title {
            title.to_string()
        } else {
            format!("{} · {}", title, self.site_title)
        };
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (full_title) }
                    style { (PreEscaped(CSS)) }
                }
                body {
                    (self.site_header(current_category))
                    main.page { (content) }
                }
            }
        }
    }

    fn site_header(&self, current_category: Option<&str>) -> Markup {
        let current = current_category.map(category_slug);
        html! {
            header.site-header {
                a.brand href="/" { (self.site_title) }
                nav.site-nav {
                    ul {
                        @for category in &self.categories {
                            @let slug = category_slug(category);
                            @let is_current = current.as_deref() == Some(slug.as_str());
                            li class=[is_current.then_some("current")] {
                                a href=(Route::Category(slug.clone()).path()) { (category) }
                            }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

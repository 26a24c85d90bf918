//! # Simple News
//!
//! A minimal news reader front end. It renders a home page with a featured
//! story, per-category listings and full article pages from an in-memory
//! article collection, as complete HTML documents.
//!
//! # Architecture: Store → Controller → Renderer
//!
//! ```text
//! Route ──► Session ──► ViewController<Query> ──(delay)──► ArticleStore
//!                              │
//!                              ▼
//!                 Loading / Ready(data) / Failed(error)
//!                              │
//!                              ▼
//!                     Renderer (maud) ──► HTML
//! ```
//!
//! - The **store** is a read-only snapshot handed in at construction. It
//!   answers four queries: all, by id, by category, related.
//! - A **view controller** per page turns one store query into a three-state
//!   view, behind a simulated network delay that can be cancelled.
//! - The **renderers** are pure functions of view state to markup.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | The `Article` record and category naming helpers |
//! | [`store`] | `ArticleStore`: lookups and filters over the collection |
//! | [`view`] | `ViewController`, page queries and the `Loading/Ready/Failed` state |
//! | [`render`] | Cards, article detail and full-page HTML with Maud |
//! | [`sanitize`] | Allowlist sanitizer for article bodies |
//! | [`route`] | URL paths to pages |
//! | [`session`] | One controller per page, driven by navigation |
//! | [`site`] | Static build of every page to a directory |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Stale results are discarded, not raced
//!
//! A page can be left, or re-opened with another parameter, while its fetch
//! is still sleeping. The pending task is aborted and, because an abort can
//! lose the race with a task that is already finishing, every result is
//! tagged with the request number it belongs to and dropped if the page has
//! moved on. See [`view`].
//!
//! ## Structured errors, presentation wording
//!
//! Controllers fail with a [`view::LoadError`] (`NotFound`, `EmptyCategory`,
//! `LoadFailure`). The sentence a reader sees is chosen by
//! [`render::failure_message`].
//!
//! ## Article bodies are untrusted
//!
//! Titles and descriptions are escaped by Maud. Bodies are HTML and go
//! through [`sanitize::Sanitizer`] before they reach a page.

pub mod config;
pub mod output;
pub mod render;
pub mod route;
pub mod sanitize;
pub mod session;
pub mod site;
pub mod store;
pub mod types;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;

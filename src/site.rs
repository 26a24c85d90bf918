//! Static site build.
//!
//! Visits every reachable page through a [`Session`] and writes the settled
//! HTML to disk, so the output is exactly what a reader would see once each
//! page finished loading.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                     # Home: featured + latest + categories
//! ├── category/
//! │   ├── technology/index.html      # One per configured browse category
//! │   └── ...
//! └── article/
//!     ├── 1/index.html               # One per article in the store
//!     └── ...
//! ```
//!
//! A configured category without articles still gets its page: the "no
//! articles found" page is what a reader following the home page link lands
//! on, so it is part of the site.

use crate::config::SiteConfig;
use crate::route::Route;
use crate::session::Session;
use crate::store::ArticleStore;
use crate::types::category_slug;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0:?} cannot be used as a path segment")]
    UnsafeSegment(String),
}

/// One written page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPage {
    pub route: Route,
    /// Path relative to the output directory.
    pub file: PathBuf,
    /// The page rendered its error state.
    pub failed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub pages: Vec<BuiltPage>,
}

impl BuildReport {
    pub fn failed(&self) -> impl Iterator<Item = &BuiltPage> {
        self.pages.iter().filter(|p| p.failed)
    }
}

/// Every route the site links to, in build order.
pub fn site_routes(store: &ArticleStore, config: &SiteConfig) -> Vec<Route> {
    let mut routes = vec![Route::Home];
    routes.extend(
        config
            .browse
            .categories
            .iter()
            .map(|c| Route::Category(category_slug(c))),
    );
    routes.extend(store.get_all().iter().map(|a| Route::Article(a.id.clone())));
    routes
}

/// Output file for a route, relative to the site root.
pub fn output_path(route: &Route) -> Result<PathBuf, SiteError> {
    let path = match route {
        Route::Home => PathBuf::from("index.html"),
        Route::Category(category) => {
            check_segment(category)?;
            Path::new("category").join(category).join("index.html")
        }
        Route::Article(id) => {
            check_segment(id)?;
            Path::new("article").join(id).join("index.html")
        }
    };
    Ok(path)
}

fn check_segment(segment: &str) -> Result<(), SiteError> {
    let unsafe_segment = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\', '\0']);
    if unsafe_segment {
        return Err(SiteError::UnsafeSegment(segment.to_string()));
    }
    Ok(())
}

/// Render the whole site into `output_dir`.
pub async fn build_site(
    store: ArticleStore,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<BuildReport, SiteError> {
    let routes = site_routes(&store, config);
    // Validate every path before writing anything.
    let files = routes
        .iter()
        .map(output_path)
        .collect::<Result<Vec<_>, _>>()?;

    fs::create_dir_all(output_dir)?;
    let mut session = Session::new(store, config);
    let mut report = BuildReport::default();

    for (route, file) in routes.into_iter().zip(files) {
        let html = session.visit(route.clone()).await;
        let failed = session.current_failed().unwrap_or(false);

        let target = output_dir.join(&file);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, html.into_string())?;
        info!(route = %route, file = %file.display(), failed, "wrote page");

        report.pages.push(BuiltPage {
            route,
            file,
            failed,
        });
    }

    info!(
        pages = report.pages.len(),
        output = %output_dir.display(),
        "site built"
    );
    Ok(report)
}

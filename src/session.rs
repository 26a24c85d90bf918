//! A browsing session: one controller per page, driven by navigation.
//!
//! Navigating mounts the controller of the target page and unmounts the page
//! being left, so a request still pending on the old page is cancelled.
//! Navigating to the same page with a new parameter (another article id,
//! another category) re-mounts that page's controller, which cancels the
//! request for the old parameter. There is no cache: every navigation runs
//! the full fetch cycle again.

use crate::config::{FetchConfig, SiteConfig};
use crate::render::Renderer;
use crate::route::Route;
use crate::store::ArticleStore;
use crate::view::{CategoryQuery, DetailQuery, ListingQuery, PageKind, ViewController};
use maud::Markup;
use tracing::debug;

pub struct Session {
    renderer: Renderer,
    listing: ViewController<ListingQuery>,
    category: ViewController<CategoryQuery>,
    detail: ViewController<DetailQuery>,
    current: Option<Route>,
}

impl Session {
    pub fn new(store: ArticleStore, config: &SiteConfig) -> Self {
        let fetch: &FetchConfig = &config.fetch;
        Self {
            renderer: Renderer::new(config),
            listing: ViewController::new(store.clone(), fetch.delay_for(PageKind::Listing)),
            category: ViewController::new(store.clone(), fetch.delay_for(PageKind::Category)),
            detail: ViewController::new(store, fetch.delay_for(PageKind::Detail)),
            current: None,
        }
    }

    pub fn current(&self) -> Option<&Route> {
        self.current.as_ref()
    }

    /// Switch to `route`, starting its fetch. Must run inside a tokio runtime.
    pub fn navigate(&mut self, route: Route) {
        debug!(from = ?self.current, to = %route, "navigate");
        if let Some(previous) = self.current.take()
            && page_of(&previous) != page_of(&route)
        {
            self.unmount(page_of(&previous));
        }

        match &route {
            Route::Home => {
                self.listing.mount(ListingQuery);
            }
            Route::Category(category) => {
                self.category.mount(CategoryQuery::new(category.clone()));
            }
            Route::Article(id) => {
                self.detail.mount(DetailQuery::new(id.clone()));
            }
        }
        self.current = Some(route);
    }

    /// Render the current page as it is right now, loading state included.
    pub fn render_snapshot(&self) -> Markup {
        match self.current.as_ref().map(page_of) {
            None | Some(PageKind::Listing) => self
                .renderer
                .render_listing_page(&self.listing.snapshot().state),
            Some(PageKind::Category) => self
                .renderer
                .render_category_page(&self.category.snapshot().state),
            Some(PageKind::Detail) => self
                .renderer
                .render_detail_page(&self.detail.snapshot().state),
        }
    }

    /// Wait for the current page to settle and render it.
    ///
    /// With nothing navigated yet, the session goes to the home page first.
    pub async fn render(&mut self) -> Markup {
        let page = match self.current.as_ref() {
            Some(route) => page_of(route),
            None => {
                self.navigate(Route::Home);
                PageKind::Listing
            }
        };
        match page {
            PageKind::Listing => {
                let snap = self.listing.settled().await;
                self.renderer.render_listing_page(&snap.state)
            }
            PageKind::Category => {
                let snap = self.category.settled().await;
                self.renderer.render_category_page(&snap.state)
            }
            PageKind::Detail => {
                let snap = self.detail.settled().await;
                self.renderer.render_detail_page(&snap.state)
            }
        }
    }

    /// Navigate to `route` and render it once settled.
    pub async fn visit(&mut self, route: Route) -> Markup {
        self.navigate(route);
        self.render().await
    }

    /// Whether the current page ended in an error state. `None` while loading.
    pub fn current_failed(&self) -> Option<bool> {
        let page = self.current.as_ref().map(page_of)?;
        let (loading, failed) = match page {
            PageKind::Listing => {
                let s = self.listing.snapshot().state;
                (s.is_loading(), s.error().is_some())
            }
            PageKind::Category => {
                let s = self.category.snapshot().state;
                (s.is_loading(), s.error().is_some())
            }
            PageKind::Detail => {
                let s = self.detail.snapshot().state;
                (s.is_loading(), s.error().is_some())
            }
        };
        (!loading).then_some(failed)
    }

    fn unmount(&mut self, page: PageKind) {
        match page {
            PageKind::Listing => self.listing.unmount(),
            PageKind::Category => self.category.unmount(),
            PageKind::Detail => self.detail.unmount(),
        }
    }
}

fn page_of(route: &Route) -> PageKind {
    match route {
        Route::Home => PageKind::Listing,
        Route::Category(_) => PageKind::Category,
        Route::Article(_) => PageKind::Detail,
    }
}

//! Per-page view state: `Loading -> Ready | Failed`.
//!
//! Each page (home listing, category, article) owns a [`ViewController`]
//! parameterized by the query it runs. Mounting the controller starts a
//! request:
//!
//! ```text
//! mount(query) ──► Loading ──(delay)──► query.run(store) ──► Ready(data)
//!                                                       └──► Failed(error)
//! ```
//!
//! The delay stands in for a network round trip. It runs on a spawned tokio
//! task that is aborted when the page is re-mounted or unmounted.
//!
//! ## Request numbers
//!
//! Every mount bumps a request number stored next to the state in the watch
//! channel. A finished task writes its result only if the channel still holds
//! its own request number and is still `Loading`, under the channel's lock.
//! Aborting alone is not enough: a task can finish between the abort call and
//! the runtime dropping it. With the check, each request transitions out of
//! `Loading` exactly once and a stale result can never overwrite a newer
//! request.

use crate::store::ArticleStore;
use crate::types::Article;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// The three pages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Listing,
    Category,
    Detail,
}

/// Why a page could not show its data.
///
/// The renderers pick the user-facing wording.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("article not found: {id}")]
    NotFound { id: String },
    #[error("no articles in category: {category}")]
    EmptyCategory { category: String },
    #[error("failed to load")]
    LoadFailure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Failed(LoadError),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            ViewState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// State tagged with the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<T> {
    /// 0 before the first mount.
    pub request: u64,
    pub state: ViewState<T>,
}

/// A store lookup backing one page.
pub trait PageQuery: Send + 'static {
    type Output: Clone + Send + Sync + 'static;

    fn kind(&self) -> PageKind;

    fn run(&self, store: &ArticleStore) -> Result<Self::Output, LoadError>;
}

// ============================================================================
// Queries
// ============================================================================

/// Home page data: the lead story plus everything after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub featured: Article,
    pub latest: Vec<Article>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListingQuery;

impl PageQuery for ListingQuery {
    type Output = Listing;

    fn kind(&self) -> PageKind {
        PageKind::Listing
    }

    fn run(&self, store: &ArticleStore) -> Result<Listing, LoadError> {
        // An empty dataset means the feed itself is broken.
        let (featured, latest) = store
            .get_all()
            .split_first()
            .ok_or(LoadError::LoadFailure)?;
        Ok(Listing {
            featured: featured.clone(),
            latest: latest.to_vec(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryListing {
    /// The category as requested (URL casing).
    pub category: String,
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone)]
pub struct CategoryQuery {
    pub category: String,
}

impl CategoryQuery {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }
}

impl PageQuery for CategoryQuery {
    type Output = CategoryListing;

    fn kind(&self) -> PageKind {
        PageKind::Category
    }

    fn run(&self, store: &ArticleStore) -> Result<CategoryListing, LoadError> {
        let articles: Vec<Article> = store
            .get_by_category(&self.category)
            .into_iter()
            .cloned()
            .collect();
        if articles.is_empty() {
            return Err(LoadError::EmptyCategory {
                category: self.category.clone(),
            });
        }
        Ok(CategoryListing {
            category: self.category.clone(),
            articles,
        })
    }
}

/// Article page data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleView {
    pub article: Article,
    pub related: Vec<Article>,
}

#[derive(Debug, Clone)]
pub struct DetailQuery {
    pub id: String,
}

impl DetailQuery {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl PageQuery for DetailQuery {
    type Output = ArticleView;

    fn kind(&self) -> PageKind {
        PageKind::Detail
    }

    fn run(&self, store: &ArticleStore) -> Result<ArticleView, LoadError> {
        let article = store
            .get_by_id(&self.id)
            .map_err(|_| LoadError::NotFound {
                id: self.id.clone(),
            })?;
        let related = store.get_related(article).into_iter().cloned().collect();
        Ok(ArticleView {
            article: article.clone(),
            related,
        })
    }
}

// ============================================================================
// Controller
// ============================================================================

pub struct ViewController<Q: PageQuery> {
    store: ArticleStore,
    delay: Duration,
    state: Arc<watch::Sender<Snapshot<Q::Output>>>,
    in_flight: Option<JoinHandle<()>>,
}

impl<Q: PageQuery> ViewController<Q> {
    pub fn new(store: ArticleStore, delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(Snapshot {
            request: 0,
            state: ViewState::Loading,
        });
        Self {
            store,
            delay,
            state: Arc::new(tx),
            in_flight: None,
        }
    }

    /// Start a request for `query`, cancelling any request still pending.
    ///
    /// Must be called from within a tokio runtime. Returns the new request
    /// number.
    pub fn mount(&mut self, query: Q) -> u64 {
        self.cancel_in_flight();

        let mut request = 0;
        self.state.send_modify(|snap| {
            snap.request += 1;
            snap.state = ViewState::Loading;
            request = snap.request;
        });
        debug!(page = ?query.kind(), request, delay_ms = self.delay.as_millis() as u64, "mount");

        let store = self.store.clone();
        let delay = self.delay;
        let state = Arc::clone(&self.state);
        self.in_flight = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let next = match catch_unwind(AssertUnwindSafe(|| query.run(&store))) {
                Ok(Ok(data)) => ViewState::Ready(data),
                Ok(Err(err)) => {
                    debug!(page = ?query.kind(), request, error = %err, "load failed");
                    ViewState::Failed(err)
                }
                Err(_) => {
                    warn!(page = ?query.kind(), request, "query panicked");
                    ViewState::Failed(LoadError::LoadFailure)
                }
            };

            let applied = state.send_if_modified(|snap| {
                if snap.request != request || !snap.state.is_loading() {
                    return false;
                }
                snap.state = next;
                true
            });
            if !applied {
                debug!(page = ?query.kind(), request, "discarded stale result");
            }
        }));
        request
    }

    /// Tear the page down: abort the pending request and make sure its
    /// result, if it races the abort, is never applied.
    pub fn unmount(&mut self) {
        self.cancel_in_flight();
        self.state.send_modify(|snap| snap.request += 1);
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot<Q::Output>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot<Q::Output> {
        self.state.borrow().clone()
    }

    /// Wait until the current request leaves `Loading`.
    ///
    /// Returns the current snapshot right away when no request is pending,
    /// which before the first mount and after [`unmount`](Self::unmount) is
    /// still `Loading`.
    pub async fn settled(&self) -> Snapshot<Q::Output> {
        let idle = self
            .in_flight
            .as_ref()
            .is_none_or(|handle| handle.is_finished());
        if idle {
            return self.snapshot();
        }

        let mut rx = self.state.subscribe();
        match rx.wait_for(|snap| !snap.state.is_loading()).await {
            Ok(snap) => snap.clone(),
            Err(_) => self.snapshot(),
        }
    }

    fn cancel_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take()
            && !handle.is_finished()
        {
            debug!("cancelling in-flight request");
            handle.abort();
        }
    }
}

impl<Q: PageQuery> Drop for ViewController<Q> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

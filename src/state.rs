//! Presentation state holder.
//!
//! [`NewsState`] owns the one observable article list the UI renders and
//! turns UI intents into repository calls.  Every operation is spawned on
//! the async task pool and returns immediately; the returned
//! [`JoinHandle`] may be ignored.
//!
//! ## Ordering
//!
//! Overlapping [`NewsState::load`] calls are neither coalesced nor
//! cancelled.  Whichever fetch completes last overwrites the list, so a slow
//! earlier request can replace the result of a faster later one.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::repository::NewsRepository;
use crate::source::Article;

/// Country used for breaking news when none is configured.
pub const DEFAULT_COUNTRY: &str = "us";

/// Which list the state holder loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsType {
    Breaking,
    Search,
    Saved,
}

impl NewsType {
    /// Tab order in the UI.
    pub const ALL: [NewsType; 3] = [NewsType::Breaking, NewsType::Search, NewsType::Saved];

    pub fn title(self) -> &'static str {
        match self {
            NewsType::Breaking => "Breaking",
            NewsType::Search => "Search",
            NewsType::Saved => "Saved",
        }
    }
}

#[derive(Clone)]
pub struct NewsState {
    repository: NewsRepository,
    news: Arc<watch::Sender<Vec<Article>>>,
    runtime: Handle,
}

impl NewsState {
    /// Create a state holder with an empty list.  Tasks are spawned on
    /// `runtime`.
    pub fn new(repository: NewsRepository, runtime: Handle) -> Self {
        let (news, _) = watch::channel(Vec::new());
        Self {
            repository,
            news: Arc::new(news),
            runtime,
        }
    }

    /// Observe the current list.  Receivers are notified on every replace.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Article>> {
        self.news.subscribe()
    }

    /// Snapshot of the current list.
    pub fn articles(&self) -> Vec<Article> {
        self.news.borrow().clone()
    }

    /// Fetch the list for `mode` and replace the observable list with it.
    ///
    /// `query` is only used for [`NewsType::Search`]; `None` searches for
    /// the empty string.  On failure the error is logged and the current list
    /// is left alone.
    pub fn load(&self, mode: NewsType, query: Option<String>, country: &str) -> JoinHandle<()> {
        let repository = self.repository.clone();
        let news = self.news.clone();
        let country = country.to_owned();

        self.runtime.spawn(async move {
            let result = match mode {
                NewsType::Breaking => repository.get_top_headlines(&country).await,
                NewsType::Search => {
                    repository
                        .get_search_news(query.as_deref().unwrap_or_default())
                        .await
                }
                NewsType::Saved => repository.get_saved_articles().await,
            };

            match result {
                Ok(articles) => {
                    news.send_replace(articles);
                }
                Err(e) => warn!(?mode, error = %e, "failed to load news"),
            }
        })
    }

    /// Persist `article`.  The observable list is not touched.
    pub fn save(&self, article: Article) -> JoinHandle<()> {
        let repository = self.repository.clone();
        self.runtime.spawn(async move {
            if let Err(e) = repository.save_article(&article).await {
                warn!(url = %article.url, error = %e, "failed to save article");
            }
        })
    }

    /// Resolve whether `article` is saved and hand the answer to `callback`.
    ///
    /// The callback runs on the task pool once the store has answered; to get
    /// the result back onto the UI thread, send it over a channel the UI
    /// drains.  If the lookup fails the callback is not invoked.
    pub fn check_saved<F>(&self, article: &Article, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(bool) + Send + 'static,
    {
        let repository = self.repository.clone();
        let url = article.url.clone();
        self.runtime.spawn(async move {
            match repository.is_article_saved(&url).await {
                Ok(saved) => callback(saved),
                Err(e) => warn!(url = %url, error = %e, "failed to check saved article"),
            }
        })
    }

    /// Remove the saved article for `url`, if any.
    ///
    /// Does not reload the list, even in [`NewsType::Saved`] mode; callers
    /// that display saved articles reload themselves.
    pub fn delete_saved(&self, url: impl Into<String>) -> JoinHandle<()> {
        let repository = self.repository.clone();
        let url = url.into();
        self.runtime.spawn(async move {
            if let Err(e) = repository.delete_article_by_url(&url).await {
                warn!(url = %url, error = %e, "failed to delete saved article");
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

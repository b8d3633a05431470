//! Shared fixtures for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::runtime::Handle;

use crate::error::{Error, Result};
use crate::repository::NewsRepository;
use crate::source::{Article, NewsResponse, NewsSource, Source};
use crate::state::NewsState;
use crate::store::SqliteStore;

/// Article with only the required fields set.
pub fn make_article(url: &str, title: Option<&str>) -> Article {
    Article {
        source: Source::new(Some("bbc-news".into()), "BBC News"),
        author: None,
        title: title.map(String::from),
        description: None,
        url: url.to_string(),
        url_to_image: None,
        published_at: "2024-03-05T10:15:00Z".to_string(),
        content: None,
    }
}

/// Article with every optional field populated.
pub fn full_article(url: &str) -> Article {
    Article {
        author: Some("Jane Doe".into()),
        title: Some("Full story".into()),
        description: Some("A description".into()),
        url_to_image: Some(format!("{url}/image.jpg")),
        content: Some("Body text".into()),
        ..make_article(url, None)
    }
}

pub fn response(articles: Vec<Article>) -> NewsResponse {
    NewsResponse {
        status: "ok".into(),
        total_results: articles.len() as u32,
        articles,
    }
}

pub fn fetch_error() -> Error {
    serde_json::from_str::<serde_json::Value>("not json")
        .unwrap_err()
        .into()
}

/// State holder over `source` and a fresh store in a temporary directory.
pub async fn state_with(source: impl NewsSource + 'static) -> (TempDir, NewsState) {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::open(dir.path().join("news.db")).await.unwrap();
    let repository = NewsRepository::new(Arc::new(source), Arc::new(store));
    (dir, NewsState::new(repository, Handle::current()))
}

/// Canned [`NewsSource`] that records every search query it receives.
#[derive(Default)]
pub struct StubSource {
    pub headlines: Vec<Article>,
    pub results: Vec<Article>,
    pub fail: bool,
    pub queries: Arc<Mutex<Vec<String>>>,
}

impl StubSource {
    pub fn with_headlines(headlines: Vec<Article>) -> Self {
        Self {
            headlines,
            ..Self::default()
        }
    }

    pub fn with_results(results: Vec<Article>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl NewsSource for StubSource {
    async fn top_headlines(&self, _country: &str) -> Result<NewsResponse> {
        if self.fail {
            return Err(fetch_error());
        }
        Ok(response(self.headlines.clone()))
    }

    async fn search(&self, query: &str) -> Result<NewsResponse> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail {
            return Err(fetch_error());
        }
        Ok(response(self.results.clone()))
    }
}

//! newsapi.org client.
//!
//! Implements [`NewsSource`] against the provider's v2 REST API: the
//! `top-headlines` endpoint for breaking news and `everything` for keyword
//! search.  Both answer with the same [`NewsResponse`] envelope.
//!
//! Inputs are passed through untouched.  An unknown country code or an empty
//! query is the provider's business, not ours.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::{NewsResponse, NewsSource};
use crate::error::{FetchError, Result};

/// Public endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/";

/// HTTP client for the headlines provider.
pub struct NewsApiClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl NewsApiClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url`: API root, e.g. `https://newsapi.org/v2/`.  A missing
    ///   trailing slash is added so endpoint paths join underneath it.
    /// * `api_key`: sent as the `apiKey` query parameter on every request.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
        })
    }

    /// URL for the country-scoped headlines feed.
    pub fn top_headlines_url(&self, country: &str) -> Result<Url> {
        let mut url = self.base_url.join("top-headlines")?;
        url.query_pairs_mut()
            .append_pair("country", country)
            .append_pair("apiKey", &self.api_key);
        Ok(url)
    }

    /// URL for a keyword search.
    pub fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = self.base_url.join("everything")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("apiKey", &self.api_key);
        Ok(url)
    }

    /// Decode a response body.
    ///
    /// Pure function so the decoding rules can be tested without a server.
    pub fn parse_response(body: &str) -> Result<NewsResponse> {
        Ok(serde_json::from_str(body).map_err(FetchError::from)?)
    }

    async fn get(&self, url: Url) -> Result<NewsResponse> {
        debug!(path = url.path(), "requesting articles");
        let body = self
            .http
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(FetchError::from)?
            .text()
            .await
            .map_err(FetchError::from)?;

        let response = Self::parse_response(&body)?;
        debug!(
            status = %response.status,
            total = response.total_results,
            received = response.articles.len(),
            "articles received"
        );
        Ok(response)
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn top_headlines(&self, country: &str) -> Result<NewsResponse> {
        self.get(self.top_headlines_url(country)?).await
    }

    async fn search(&self, query: &str) -> Result<NewsResponse> {
        self.get(self.search_url(query)?).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

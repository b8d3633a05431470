//! Remote source abstraction layer.
//!
//! This module defines the [`NewsSource`] trait and the article types the
//! provider returns.  The concrete newsapi.org client lives in [`newsapi`].
//!
//! ## For contributors: adding a new provider
//!
//! 1. Create a new file in this directory (e.g. `gnews.rs`).
//! 2. Define a client struct and implement [`NewsSource`] for it, converting
//!    the provider's payload into [`NewsResponse`].
//! 3. Add `mod gnews;` below and re-export your struct in the `pub use` block.
//! 4. Construct it in `main.rs` instead of [`NewsApiClient`].
//!
//! The repository, state holder and UI are provider-agnostic.

mod article;
mod newsapi;

pub use article::{Article, NewsResponse, Source};
pub use newsapi::{NewsApiClient, DEFAULT_BASE_URL};

use async_trait::async_trait;

use crate::error::Result;

/// Read-only access to a headlines provider.
///
/// Calls run on the async task pool, so implementations must be
/// [`Send`] + [`Sync`].  Any transport or decoding failure is reported as
/// [`crate::error::Error::Fetch`]; there is no retry.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Current top headlines for a two-letter country code.
    async fn top_headlines(&self, country: &str) -> Result<NewsResponse>;

    /// Articles matching a keyword query.  An empty query is sent as-is.
    async fn search(&self, query: &str) -> Result<NewsResponse>;
}

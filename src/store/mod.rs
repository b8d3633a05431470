//! Local persistence for bookmarked articles.
//!
//! One logical table of [`SavedArticleRow`]s keyed by article URL.  Every
//! write replaces a whole row; nothing is updated in place.

mod sqlite;

pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::error::Result;

/// A saved article as it is persisted on disk.
///
/// Unlike [`crate::source::Article`], every column is a non-null string and
/// the publisher is collapsed to its display name.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SavedArticleRow {
    pub source_name: String,
    pub author: String,
    pub title: String,
    pub description: String,
    /// Primary key.
    pub url: String,
    pub url_to_image: String,
    pub published_at: String,
    pub content: String,
}

/// Keyed access to the saved-article table.
///
/// Lookups for a URL that was never saved return `None`/`false`; they are
/// not errors.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Insert a row, replacing any existing row with the same `url`.
    async fn upsert(&self, row: &SavedArticleRow) -> Result<()>;

    /// Remove the row whose every column equals `row`.  Returns whether a
    /// row was removed.
    async fn delete(&self, row: &SavedArticleRow) -> Result<bool>;

    async fn exists_by_url(&self, url: &str) -> Result<bool>;

    async fn get_by_url(&self, url: &str) -> Result<Option<SavedArticleRow>>;

    /// Every saved row, in storage order.
    async fn get_all(&self) -> Result<Vec<SavedArticleRow>>;
}

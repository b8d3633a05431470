//! The one place where the remote source and the local store meet.
//!
//! [`NewsRepository`] forwards reads to the provider unchanged and owns the
//! translation between the provider's [`Article`] shape and the persisted
//! [`SavedArticleRow`].  Nothing is cached: every call goes to its backing
//! store.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::source::{Article, NewsSource, Source};
use crate::store::{ArticleStore, SavedArticleRow};

#[derive(Clone)]
pub struct NewsRepository {
    source: Arc<dyn NewsSource>,
    store: Arc<dyn ArticleStore>,
}

impl NewsRepository {
    pub fn new(source: Arc<dyn NewsSource>, store: Arc<dyn ArticleStore>) -> Self {
        Self { source, store }
    }

    /// Top headlines for `country`, tombstones included.
    pub async fn get_top_headlines(&self, country: &str) -> Result<Vec<Article>> {
        Ok(self.source.top_headlines(country).await?.articles)
    }

    /// Search results for `query`, tombstones included.
    pub async fn get_search_news(&self, query: &str) -> Result<Vec<Article>> {
        Ok(self.source.search(query).await?.articles)
    }

    /// Every saved row, turned back into the shared article shape.
    pub async fn get_saved_articles(&self) -> Result<Vec<Article>> {
        let rows = self.store.get_all().await?;
        Ok(rows.into_iter().map(to_article).collect())
    }

    pub async fn save_article(&self, article: &Article) -> Result<()> {
        self.store.upsert(&to_row(article)).await
    }

    pub async fn is_article_saved(&self, url: &str) -> Result<bool> {
        self.store.exists_by_url(url).await
    }

    /// Delete the saved row for `url`.  A URL that was never saved is a
    /// silent no-op.
    pub async fn delete_article_by_url(&self, url: &str) -> Result<()> {
        match self.store.get_by_url(url).await? {
            Some(row) => {
                self.store.delete(&row).await?;
            }
            None => debug!(url, "nothing saved under url"),
        }
        Ok(())
    }
}

/// Article → row.  Missing values become empty strings and the publisher
/// collapses to its name.
fn to_row(article: &Article) -> SavedArticleRow {
    let or_empty = |value: &Option<String>| value.clone().unwrap_or_default();

    SavedArticleRow {
        source_name: article.source.name.clone(),
        author: or_empty(&article.author),
        title: or_empty(&article.title),
        description: or_empty(&article.description),
        url: article.url.clone(),
        url_to_image: or_empty(&article.url_to_image),
        published_at: article.published_at.clone(),
        content: or_empty(&article.content),
    }
}

/// Row → article.  The publisher id is not stored, so it is rebuilt from
/// the name.
fn to_article(row: SavedArticleRow) -> Article {
    Article {
        source: Source::new(Some(row.source_name.clone()), row.source_name),
        author: Some(row.author),
        title: Some(row.title),
        description: Some(row.description),
        url: row.url,
        url_to_image: Some(row.url_to_image),
        published_at: row.published_at,
        content: Some(row.content),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;
    use crate::test_support::{full_article, make_article, StubSource};
    use tempfile::TempDir;

    async fn repository(source: StubSource) -> (TempDir, NewsRepository, Arc<SqliteStore>) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(SqliteStore::open(dir.path().join("news.db")).await.unwrap());
        let repo = NewsRepository::new(Arc::new(source), store.clone());
        (dir, repo, store)
    }

    // -- row mapping ---------------------------------------------------------

    #[test]
    fn to_row_coerces_missing_fields_to_empty() {
        let row = to_row(&make_article("https://example.com/a", None));

        assert_eq!(row.url, "https://example.com/a");
        assert_eq!(row.source_name, "BBC News");
        assert_eq!(row.title, "");
        assert_eq!(row.author, "");
        assert_eq!(row.description, "");
        assert_eq!(row.url_to_image, "");
        assert_eq!(row.content, "");
    }

    #[test]
    fn to_article_synthesizes_source_id_from_name() {
        let article = to_article(to_row(&full_article("https://example.com/a")));
        assert_eq!(article.source, Source::new(Some("BBC News".into()), "BBC News"));
    }

    #[test]
    fn round_trip_keeps_everything_but_source_id() {
        let original = full_article("https://example.com/a");
        let back = to_article(to_row(&original));

        assert_ne!(back.source.id, original.source.id);
        assert_eq!(back.source.name, original.source.name);
        assert_eq!(Article { source: original.source.clone(), ..back }, original);
    }

    // -- remote reads --------------------------------------------------------

    #[tokio::test]
    async fn top_headlines_are_returned_unfiltered() {
        let source = StubSource::with_headlines(vec![
            make_article("a", Some("Alive")),
            make_article("b", Some("[Removed]")),
        ]);
        let (_dir, repo, _) = repository(source).await;

        let articles = repo.get_top_headlines("us").await.unwrap();
        assert_eq!(articles.len(), 2);
        assert!(articles[1].is_removed());
    }

    #[tokio::test]
    async fn search_forwards_query() {
        let source = StubSource::default();
        let queries = source.queries.clone();
        let (_dir, repo, _) = repository(source).await;

        repo.get_search_news("").await.unwrap();
        repo.get_search_news("rust").await.unwrap();

        assert_eq!(*queries.lock().unwrap(), vec!["".to_string(), "rust".to_string()]);
    }

    #[tokio::test]
    async fn search_results_are_returned_unfiltered() {
        let results = vec![
            full_article("https://example.com/hit"),
            make_article("https://example.com/gone", Some("[Removed]")),
        ];
        let (_dir, repo, _) = repository(StubSource::with_results(results.clone())).await;

        let articles = repo.get_search_news("rust").await.unwrap();

        assert_eq!(articles, results);
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        let (_dir, repo, _) = repository(StubSource::failing()).await;
        assert!(repo.get_top_headlines("us").await.is_err());
    }

    // -- saved articles ------------------------------------------------------

    #[tokio::test]
    async fn save_then_check_and_list() {
        let (_dir, repo, store) = repository(StubSource::default()).await;
        let article = make_article("https://example.com/a", Some("Title"));

        repo.save_article(&article).await.unwrap();

        assert!(repo.is_article_saved(&article.url).await.unwrap());
        assert_eq!(store.get_by_url(&article.url).await.unwrap(), Some(to_row(&article)));

        let saved = repo.get_saved_articles().await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].title.as_deref(), Some("Title"));
    }

    #[tokio::test]
    async fn resave_keeps_single_row_with_latest_values() {
        let (_dir, repo, _) = repository(StubSource::default()).await;
        repo.save_article(&make_article("a", Some("Old"))).await.unwrap();
        repo.save_article(&make_article("a", Some("New"))).await.unwrap();

        let saved = repo.get_saved_articles().await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].title.as_deref(), Some("New"));
    }

    #[tokio::test]
    async fn saved_articles_round_trip_through_save() {
        let (_dir, repo, _) = repository(StubSource::default()).await;
        repo.save_article(&full_article("a")).await.unwrap();

        let first = repo.get_saved_articles().await.unwrap();
        repo.save_article(&first[0]).await.unwrap();
        let second = repo.get_saved_articles().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second[0].source.id.as_deref(), Some("BBC News"));
    }

    #[tokio::test]
    async fn delete_by_url_removes_row() {
        let (_dir, repo, _) = repository(StubSource::default()).await;
        repo.save_article(&make_article("a", Some("A"))).await.unwrap();

        repo.delete_article_by_url("a").await.unwrap();
        assert!(!repo.is_article_saved("a").await.unwrap());
    }

    #[tokio::test]
    async fn delete_unknown_url_is_silent_noop() {
        let (_dir, repo, _) = repository(StubSource::default()).await;
        repo.save_article(&make_article("kept", Some("K"))).await.unwrap();

        repo.delete_article_by_url("missing").await.unwrap();
        assert_eq!(repo.get_saved_articles().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn removed_article_can_still_be_saved_and_deleted() {
        let (_dir, repo, _) = repository(StubSource::default()).await;
        let tombstone = make_article("gone", Some("[Removed]"));

        repo.save_article(&tombstone).await.unwrap();
        assert!(repo.is_article_saved("gone").await.unwrap());

        repo.delete_article_by_url("gone").await.unwrap();
        assert!(!repo.is_article_saved("gone").await.unwrap());
    }
}

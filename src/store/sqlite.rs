//! SQLite-backed [`ArticleStore`].
//!
//! The schema is versioned through `PRAGMA user_version`.  When the version on
//! disk does not match [`SCHEMA_VERSION`] the table is dropped and recreated;
//! saved articles do not survive a schema bump.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use super::{ArticleStore, SavedArticleRow};
use crate::error::Result;

/// Bump whenever the `saved_articles` layout changes.
pub const SCHEMA_VERSION: i64 = 2;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS saved_articles (
        url TEXT PRIMARY KEY NOT NULL,
        source_name TEXT NOT NULL,
        author TEXT NOT NULL,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        url_to_image TEXT NOT NULL,
        published_at TEXT NOT NULL,
        content TEXT NOT NULL
    )
"#;

const SELECT_COLUMNS: &str =
    "SELECT source_name, author, title, description, url, url_to_image, published_at, content \
     FROM saved_articles";

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database file at `path` and bring the
    /// schema up to [`SCHEMA_VERSION`].
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "opening article store");

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        let version: i64 = sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(&self.pool)
            .await?;

        if version != SCHEMA_VERSION {
            info!(
                found = version,
                expected = SCHEMA_VERSION,
                "schema version changed, recreating saved_articles"
            );
            sqlx::query("DROP TABLE IF EXISTS saved_articles")
                .execute(&self.pool)
                .await?;
        }

        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;

        // PRAGMA does not accept bound parameters.
        sqlx::query(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl ArticleStore for SqliteStore {
    async fn upsert(&self, row: &SavedArticleRow) -> Result<()> {
        debug!(url = %row.url, "upserting saved article");
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO saved_articles
            (url, source_name, author, title, description, url_to_image, published_at, content)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&row.url)
        .bind(&row.source_name)
        .bind(&row.author)
        .bind(&row.title)
        .bind(&row.description)
        .bind(&row.url_to_image)
        .bind(&row.published_at)
        .bind(&row.content)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, row: &SavedArticleRow) -> Result<bool> {
        debug!(url = %row.url, "deleting saved article");
        let result = sqlx::query(
            r#"
            DELETE FROM saved_articles
            WHERE url = ? AND source_name = ? AND author = ? AND title = ?
              AND description = ? AND url_to_image = ? AND published_at = ? AND content = ?
            "#,
        )
        .bind(&row.url)
        .bind(&row.source_name)
        .bind(&row.author)
        .bind(&row.title)
        .bind(&row.description)
        .bind(&row.url_to_image)
        .bind(&row.published_at)
        .bind(&row.content)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_url(&self, url: &str) -> Result<bool> {
        let exists: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM saved_articles WHERE url = ?)")
                .bind(url)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists != 0)
    }

    async fn get_by_url(&self, url: &str) -> Result<Option<SavedArticleRow>> {
        let row = sqlx::query_as::<_, SavedArticleRow>(&format!(
            "{SELECT_COLUMNS} WHERE url = ? LIMIT 1"
        ))
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get_all(&self) -> Result<Vec<SavedArticleRow>> {
        let rows = sqlx::query_as::<_, SavedArticleRow>(&format!("{SELECT_COLUMNS} ORDER BY rowid"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! The article shape shared by the remote client, the repository and the UI.
//!
//! Field names follow the provider's JSON (`urlToImage`, `publishedAt`, ...)
//! so a response body deserialises straight into these types.  Every field
//! the provider may omit is an `Option`; nothing is coerced here.
//!
//! ## For contributors
//!
//! The locally persisted row lives in [`crate::store::SavedArticleRow`].  Do
//! not add conversions between the two shapes here; the repository owns them.

use chrono::DateTime;
use serde::Deserialize;

/// Title the provider puts on articles whose content has been taken down.
pub const REMOVED_TITLE: &str = "[Removed]";

/// A news publisher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Source {
    /// Provider-side identifier; often `null` in the feed.
    pub id: Option<String>,
    /// Display name (e.g. "BBC News").
    pub name: String,
}

impl Source {
    pub fn new(id: Option<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A single article as delivered by the provider.
///
/// `url` is the identity key: it joins remote results to saved rows.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: Source,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    /// ISO-8601 timestamp, kept as the provider sent it.
    pub published_at: String,
    pub content: Option<String>,
}

impl Article {
    /// Whether the provider has tombstoned this article.
    ///
    /// Removed articles are hidden from breaking/search lists but can still
    /// be saved or deleted by URL.
    pub fn is_removed(&self) -> bool {
        self.title.as_deref() == Some(REMOVED_TITLE)
    }

    /// Publication date rendered as e.g. `5 March 2024`.
    ///
    /// Falls back to `????-??-??` when the timestamp does not parse.
    pub fn published_label(&self) -> String {
        DateTime::parse_from_rfc3339(&self.published_at)
            .map(|dt| dt.format("%-d %B %Y").to_string())
            .unwrap_or_else(|_| "????-??-??".into())
    }
}

/// Envelope returned by both the headlines and search endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub status: String,
    #[serde(default)]
    pub total_results: u32,
    #[serde(default)]
    pub articles: Vec<Article>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_article;

    #[test]
    fn removed_title_marks_tombstone() {
        assert!(make_article("u1", Some("[Removed]")).is_removed());
        assert!(!make_article("u2", Some("Markets rally")).is_removed());
        assert!(!make_article("u3", None).is_removed());
    }

    #[test]
    fn published_label_formats_day_month_year() {
        let article = make_article("u", Some("t"));
        assert_eq!(article.published_label(), "5 March 2024");
    }

    #[test]
    fn published_label_accepts_offsets() {
        let mut article = make_article("u", Some("t"));
        article.published_at = "2023-12-31T23:30:00+02:00".into();
        assert_eq!(article.published_label(), "31 December 2023");
    }

    #[test]
    fn published_label_falls_back_on_garbage() {
        let mut article = make_article("u", Some("t"));
        article.published_at = "yesterday".into();
        assert_eq!(article.published_label(), "????-??-??");
    }

    #[test]
    fn deserializes_provider_field_names() {
        let json = r#"{
            "source": {"id": null, "name": "Reuters"},
            "author": "Jane Doe",
            "title": "Headline",
            "description": null,
            "url": "https://example.com/a",
            "urlToImage": "https://example.com/a.jpg",
            "publishedAt": "2024-01-01T00:00:00Z",
            "content": "Body"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();

        assert_eq!(article.source, Source::new(None, "Reuters"));
        assert_eq!(article.author.as_deref(), Some("Jane Doe"));
        assert!(article.description.is_none());
        assert_eq!(article.url_to_image.as_deref(), Some("https://example.com/a.jpg"));
        assert_eq!(article.published_at, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn missing_optional_fields_become_none() {
        let json = r#"{
            "source": {"name": "Wire"},
            "url": "https://example.com/b",
            "publishedAt": "2024-01-01T00:00:00Z"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();

        assert!(article.source.id.is_none());
        assert!(article.title.is_none());
        assert!(article.content.is_none());
    }
}

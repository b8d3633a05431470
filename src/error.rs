//! Error types shared by the client, the store and the repository.

use thiserror::Error;

/// Anything that can go wrong talking to the headlines provider.
///
/// Callers only ever branch on [`Error::Fetch`]; the inner variant is kept
/// for log messages.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Fetch(FetchError::Decode(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

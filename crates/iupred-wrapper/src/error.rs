//! Error types for the IUPred3 client.

use std::path::PathBuf;

/// All errors that can occur while resolving credentials or talking to the service.
#[derive(thiserror::Error, Debug)]
pub enum WrapperError {
    #[error("[Errno 2]: No such file or directory {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Couldn't find the cookies database file: {0}")]
    CookieDbNotFound(String),

    #[error("Unable to read or parse cookies")]
    CookiesUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("FASTA error: {0}")]
    Fasta(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed result from {url}: {source}")]
    MalformedResult {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Credentials cannot be sent as a cookie header: {0}")]
    InvalidCookie(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WrapperError {
    /// Wrap any cookie copy/open/query failure into the single lookup error.
    pub fn cookies<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        WrapperError::CookiesUnavailable(Box::new(err))
    }
}

/// Convenience alias used across the crate.
pub type WrapperResult<T> = Result<T, WrapperError>;

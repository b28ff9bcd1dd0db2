use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParserError>;

/// Failure of a single HTTP request.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(u16),
}

#[derive(Debug, Error)]
pub enum ParserError {
    /// A required node is missing; the page markup no longer matches.
    #[error("tag not found: {tag} {attrs} {text}")]
    NotFound {
        tag: String,
        attrs: String,
        text: String,
    },

    #[error("failed to load page {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("invalid search type: {0}")]
    InvalidSearchType(String),

    #[error("invalid output selector: {0}")]
    InvalidOutputSelector(String),

    #[error("no file name in url: {0}")]
    MissingFileName(String),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("response cache error: {0}")]
    Cache(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParserError {
    pub fn not_found(tag: &str, attrs: &str, text: &str) -> Self {
        Self::NotFound {
            tag: tag.to_string(),
            attrs: attrs.to_string(),
            text: text.to_string(),
        }
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// Network failure, timeout, or non-2xx upstream status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("decode error from {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

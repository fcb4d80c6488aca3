//! Source adapter abstractions.

mod dev_to;
mod github;
mod hacker_news;
mod reddit;

pub use dev_to::DevToSource;
pub use github::GitHubSource;
pub use hacker_news::HackerNewsSource;
pub use reddit::RedditSource;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use devpulse_core::{Platform, Post};

use crate::error::SourceError;

/// Fixed per-platform result cap.
pub(crate) const PAGE_SIZE: u32 = 10;

/// Placeholder title for items the upstream reports without one.
pub(crate) const UNTITLED: &str = "Untitled";

/// One upstream search endpoint: given a topic, produce normalized posts,
/// or fail. Adapters are interchangeable from the aggregator's point of view.
#[async_trait]
pub trait Source: Send + Sync {
    fn platform(&self) -> Platform;

    /// Issues one search request for `topic` and maps the response into
    /// [`Post`] records in upstream order.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on network failure, timeout, non-2xx status,
    /// or a malformed response body. No retries are attempted.
    async fn fetch(&self, topic: &str) -> Result<Vec<Post>, SourceError>;
}

/// Drops empty strings so upstream `""` fields behave like absent ones.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Best-effort RFC 3339 parse; unparseable timestamps degrade to `None`.
pub(crate) fn parse_rfc3339(value: Option<String>) -> Option<DateTime<Utc>> {
    value
        .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_drops_empty_strings() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("x".to_string())), Some("x".to_string()));
    }

    #[test]
    fn parse_rfc3339_accepts_valid_and_degrades_invalid() {
        let parsed = parse_rfc3339(Some("2025-06-01T12:00:00Z".to_string()));
        assert!(parsed.is_some());
        assert_eq!(parse_rfc3339(Some("last tuesday".to_string())), None);
        assert_eq!(parse_rfc3339(None), None);
    }
}

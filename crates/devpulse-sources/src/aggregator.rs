//! Concurrent fan-out over the declared source adapters.

use futures::future::join_all;

use devpulse_core::{Platform, PlatformResult};

use crate::error::SourceError;
use crate::fetch::FetchConfig;
use crate::sources::{DevToSource, GitHubSource, HackerNewsSource, RedditSource, Source};

/// Runs every source adapter for a topic and assembles the combined result
/// list.
///
/// The adapter set is closed and declared once, in [`Aggregator::new`];
/// results always come back in that declared order.
pub struct Aggregator {
    sources: Vec<Box<dyn Source>>,
}

impl Aggregator {
    /// Builds the production adapter set: Reddit, Hacker News, GitHub, Dev.to.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if any adapter's HTTP client cannot be built.
    pub fn new(config: &FetchConfig) -> Result<Self, SourceError> {
        Ok(Self::from_sources(vec![
            Box::new(RedditSource::new(config)?),
            Box::new(HackerNewsSource::new(config)?),
            Box::new(GitHubSource::new(config)?),
            Box::new(DevToSource::new(config)?),
        ]))
    }

    /// Builds an aggregator over an explicit adapter list (used by tests to
    /// substitute stub or mock-server-backed sources).
    #[must_use]
    pub fn from_sources(sources: Vec<Box<dyn Source>>) -> Self {
        Self { sources }
    }

    /// The declared platforms, in invocation order.
    #[must_use]
    pub fn platforms(&self) -> Vec<Platform> {
        self.sources.iter().map(|source| source.platform()).collect()
    }

    /// Searches every platform for `topic` concurrently and waits for all of
    /// them to settle.
    ///
    /// Returns exactly one [`PlatformResult`] per declared adapter, in
    /// declared order. A failed adapter contributes an empty result carrying
    /// its error message instead of failing the aggregation; total latency is
    /// bounded by the slowest adapter, not the sum.
    pub async fn aggregate(&self, topic: &str) -> Vec<PlatformResult> {
        let fetches = self
            .sources
            .iter()
            .map(|source| settle(source.as_ref(), topic));
        join_all(fetches).await
    }
}

/// Resolves one adapter invocation to a terminal [`PlatformResult`], never an
/// error. This is the containment layer that keeps one dead upstream from
/// taking down the whole aggregation.
async fn settle(source: &dyn Source, topic: &str) -> PlatformResult {
    let platform = source.platform();
    match source.fetch(topic).await {
        Ok(posts) => {
            tracing::debug!(
                platform = platform.as_str(),
                topic,
                count = posts.len(),
                "collected posts"
            );
            PlatformResult {
                query: topic.to_string(),
                platform,
                posts,
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!(
                platform = platform.as_str(),
                topic,
                error = %e,
                "source fetch failed"
            );
            PlatformResult {
                query: topic.to_string(),
                platform,
                posts: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_set_declares_four_platforms_in_order() {
        let aggregator =
            Aggregator::new(&FetchConfig::default()).expect("adapters should construct");
        assert_eq!(
            aggregator.platforms(),
            vec![
                Platform::Reddit,
                Platform::HackerNews,
                Platform::GitHub,
                Platform::DevTo,
            ]
        );
    }
}

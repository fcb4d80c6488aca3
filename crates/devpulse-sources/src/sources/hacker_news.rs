//! Hacker News search adapter, backed by the Algolia HN index.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use devpulse_core::{Engagement, Platform, Post};

use super::{non_empty, parse_rfc3339, Source, PAGE_SIZE, UNTITLED};
use crate::error::SourceError;
use crate::fetch::{endpoint_url, get_json, FetchConfig};

const DEFAULT_BASE_URL: &str = "https://hn.algolia.com";

/// Fallback item link for hits that carry no outbound URL (Ask/Show HN).
const ITEM_URL: &str = "https://news.ycombinator.com/item";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    title: Option<String>,
    story_text: Option<String>,
    comment_text: Option<String>,
    url: Option<String>,
    #[serde(rename = "objectID")]
    object_id: Option<String>,
    author: Option<String>,
    created_at: Option<String>,
    points: Option<u64>,
    num_comments: Option<u64>,
}

pub struct HackerNewsSource {
    client: Client,
    search_url: Url,
}

impl HackerNewsSource {
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &FetchConfig) -> Result<Self, SourceError> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Creates an adapter with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built, or
    /// [`SourceError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(config: &FetchConfig, base_url: &str) -> Result<Self, SourceError> {
        Ok(Self {
            client: config.client_builder().build()?,
            search_url: endpoint_url(base_url, "api/v1/search")?,
        })
    }
}

#[async_trait]
impl Source for HackerNewsSource {
    fn platform(&self) -> Platform {
        Platform::HackerNews
    }

    async fn fetch(&self, topic: &str) -> Result<Vec<Post>, SourceError> {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("query", topic)
            .append_pair("hitsPerPage", &PAGE_SIZE.to_string());

        let response: SearchResponse = get_json(&self.client, url).await?;
        Ok(response.hits.into_iter().filter_map(to_post).collect())
    }
}

fn to_post(hit: Hit) -> Option<Post> {
    let url = non_empty(hit.url).or_else(|| {
        hit.object_id
            .as_deref()
            .map(|id| format!("{ITEM_URL}?id={id}"))
    })?;
    let title = non_empty(hit.title);
    let content = non_empty(hit.story_text)
        .or_else(|| non_empty(hit.comment_text))
        .or_else(|| title.clone())
        .unwrap_or_default();

    Some(Post {
        platform: Platform::HackerNews,
        title: title.unwrap_or_else(|| UNTITLED.to_string()),
        content,
        url,
        author: non_empty(hit.author),
        timestamp: parse_rfc3339(hit.created_at),
        engagement: Engagement::from_counts(hit.points, hit.num_comments),
    })
}

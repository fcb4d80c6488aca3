//! Reddit search adapter (public JSON listing API, no auth).

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, Url};
use serde::Deserialize;

use devpulse_core::{Engagement, Platform, Post};

use super::{non_empty, Source, PAGE_SIZE, UNTITLED};
use crate::error::SourceError;
use crate::fetch::{endpoint_url, get_json, FetchConfig};

const DEFAULT_BASE_URL: &str = "https://www.reddit.com";

/// Post permalinks are site-relative; they always resolve against the
/// canonical site, not the API base (which tests point at a mock server).
const SITE_URL: &str = "https://www.reddit.com";

/// Reddit search listing wrapper.
#[derive(Debug, Deserialize)]
struct Listing {
    #[serde(default)]
    data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: ChildData,
}

#[derive(Debug, Deserialize)]
struct ChildData {
    title: Option<String>,
    selftext: Option<String>,
    permalink: Option<String>,
    author: Option<String>,
    created_utc: Option<f64>,
    ups: Option<u64>,
    num_comments: Option<u64>,
}

pub struct RedditSource {
    client: Client,
    search_url: Url,
}

impl RedditSource {
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
            search_url: endpoint_url(base_url, "search.json")?,
        })
    }
}

#[async_trait]
impl Source for RedditSource {
    fn platform(&self) -> Platform {
        Platform::Reddit
    }

    async fn fetch(&self, topic: &str) -> Result<Vec<Post>, SourceError> {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("q", topic)
            .append_pair("limit", &PAGE_SIZE.to_string())
            .append_pair("sort", "relevance");

        let listing: Listing = get_json(&self.client, url).await?;
        Ok(listing
            .data
            .children
            .into_iter()
            .filter_map(|child| to_post(child.data))
            .collect())
    }
}

fn to_post(data: ChildData) -> Option<Post> {
    // A post without a permalink has no usable link; skip it.
    let permalink = non_empty(data.permalink)?;
    let title = non_empty(data.title);
    let content = non_empty(data.selftext)
        .or_else(|| title.clone())
        .unwrap_or_default();

    Some(Post {
        platform: Platform::Reddit,
        title: title.unwrap_or_else(|| UNTITLED.to_string()),
        content,
        url: format!("{SITE_URL}{permalink}"),
        author: non_empty(data.author),
        timestamp: data
            .created_utc
            .and_then(|secs| DateTime::from_timestamp(secs as i64, 0)),
        engagement: Engagement::from_counts(data.ups, data.num_comments),
    })
}

//! Dev.to article adapter (public articles API, tag search).

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use devpulse_core::{Engagement, Platform, Post};

use super::{non_empty, parse_rfc3339, Source, PAGE_SIZE, UNTITLED};
use crate::error::SourceError;
use crate::fetch::{endpoint_url, get_json, FetchConfig};

const DEFAULT_BASE_URL: &str = "https://dev.to";

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    user: Option<ArticleUser>,
    published_at: Option<String>,
    positive_reactions_count: Option<u64>,
    comments_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ArticleUser {
    username: Option<String>,
}

pub struct DevToSource {
    client: Client,
    articles_url: Url,
}

impl DevToSource {
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
            articles_url: endpoint_url(base_url, "api/articles")?,
        })
    }
}

#[async_trait]
impl Source for DevToSource {
    fn platform(&self) -> Platform {
        Platform::DevTo
    }

    async fn fetch(&self, topic: &str) -> Result<Vec<Post>, SourceError> {
        let mut url = self.articles_url.clone();
        // Dev.to searches by tag rather than free text.
        url.query_pairs_mut()
            .append_pair("tag", topic)
            .append_pair("per_page", &PAGE_SIZE.to_string());

        let articles: Vec<Article> = get_json(&self.client, url).await?;
        Ok(articles.into_iter().filter_map(to_post).collect())
    }
}

fn to_post(article: Article) -> Option<Post> {
    let url = non_empty(article.url)?;

    Some(Post {
        platform: Platform::DevTo,
        title: non_empty(article.title).unwrap_or_else(|| UNTITLED.to_string()),
        content: non_empty(article.description).unwrap_or_default(),
        url,
        author: article.user.and_then(|user| non_empty(user.username)),
        timestamp: parse_rfc3339(article.published_at),
        engagement: Engagement::from_counts(
            article.positive_reactions_count,
            article.comments_count,
        ),
    })
}

//! GitHub repository search adapter (unauthenticated REST search API).

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Url};
use serde::Deserialize;

use devpulse_core::{Engagement, Platform, Post};

use super::{non_empty, parse_rfc3339, Source, PAGE_SIZE, UNTITLED};
use crate::error::SourceError;
use crate::fetch::{endpoint_url, get_json, FetchConfig};

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<Repository>,
}

#[derive(Debug, Deserialize)]
struct Repository {
    full_name: Option<String>,
    description: Option<String>,
    html_url: Option<String>,
    owner: Option<Owner>,
    created_at: Option<String>,
    stargazers_count: Option<u64>,
    open_issues_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Owner {
    login: Option<String>,
}

pub struct GitHubSource {
    client: Client,
    search_url: Url,
}

impl GitHubSource {
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
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));
        Ok(Self {
            client: config.client_builder().default_headers(headers).build()?,
            search_url: endpoint_url(base_url, "search/repositories")?,
        })
    }
}

#[async_trait]
impl Source for GitHubSource {
    fn platform(&self) -> Platform {
        Platform::GitHub
    }

    async fn fetch(&self, topic: &str) -> Result<Vec<Post>, SourceError> {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("q", topic)
            .append_pair("sort", "stars")
            .append_pair("per_page", &PAGE_SIZE.to_string());

        let response: SearchResponse = get_json(&self.client, url).await?;
        Ok(response.items.into_iter().filter_map(to_post).collect())
    }
}

fn to_post(repo: Repository) -> Option<Post> {
    let url = non_empty(repo.html_url)?;

    Some(Post {
        platform: Platform::GitHub,
        title: non_empty(repo.full_name).unwrap_or_else(|| UNTITLED.to_string()),
        // Repositories have no body text; the description is the whole content.
        content: non_empty(repo.description).unwrap_or_default(),
        url,
        author: repo.owner.and_then(|owner| non_empty(owner.login)),
        timestamp: parse_rfc3339(repo.created_at),
        engagement: Engagement::from_counts(repo.stargazers_count, repo.open_issues_count),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(value: serde_json::Value) -> Repository {
        serde_json::from_value(value).expect("valid repository")
    }

    #[test]
    fn maps_repository_fields() {
        let post = to_post(repo(serde_json::json!({
            "full_name": "tokio-rs/tokio",
            "description": "A runtime for writing reliable async applications",
            "html_url": "https://github.com/tokio-rs/tokio",
            "owner": { "login": "tokio-rs" },
            "created_at": "2016-08-26T17:18:13Z",
            "stargazers_count": 26000,
            "open_issues_count": 400
        })))
        .expect("maps");

        assert_eq!(post.platform, Platform::GitHub);
        assert_eq!(post.title, "tokio-rs/tokio");
        assert_eq!(
            post.content,
            "A runtime for writing reliable async applications"
        );
        assert_eq!(post.url, "https://github.com/tokio-rs/tokio");
        assert_eq!(post.author.as_deref(), Some("tokio-rs"));
        let engagement = post.engagement.expect("engagement present");
        assert_eq!(engagement.likes, Some(26000));
        assert_eq!(engagement.comments, Some(400));
    }

    #[test]
    fn missing_description_maps_to_empty_content() {
        let post = to_post(repo(serde_json::json!({
            "full_name": "acme/empty",
            "html_url": "https://github.com/acme/empty"
        })))
        .expect("maps");
        assert_eq!(post.content, "");
        assert_eq!(post.author, None);
    }

    #[test]
    fn repository_without_html_url_is_skipped() {
        assert!(to_post(repo(serde_json::json!({ "full_name": "acme/hidden" }))).is_none());
    }
}

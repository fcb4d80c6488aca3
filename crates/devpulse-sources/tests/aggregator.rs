//! Settle-all behavior of the aggregator, with stub and mock-server sources.

use std::time::{Duration, Instant};

use async_trait::async_trait;

use devpulse_core::{Platform, Post};
use devpulse_sources::{
    Aggregator, DevToSource, FetchConfig, GitHubSource, HackerNewsSource, RedditSource, Source,
    SourceError,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_post(platform: Platform, n: usize) -> Post {
    Post {
        platform,
        title: format!("post {n}"),
        content: String::new(),
        url: format!("https://example.com/{n}"),
        author: None,
        timestamp: None,
        engagement: None,
    }
}

/// Always succeeds with a fixed number of posts.
struct StaticSource {
    platform: Platform,
    post_count: usize,
}

#[async_trait]
impl Source for StaticSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn fetch(&self, _topic: &str) -> Result<Vec<Post>, SourceError> {
        Ok((0..self.post_count)
            .map(|n| sample_post(self.platform, n))
            .collect())
    }
}

/// Always fails.
struct FailingSource {
    platform: Platform,
}

#[async_trait]
impl Source for FailingSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn fetch(&self, _topic: &str) -> Result<Vec<Post>, SourceError> {
        Err(SourceError::InvalidBaseUrl {
            url: "stub".to_string(),
            reason: "upstream unreachable".to_string(),
        })
    }
}

/// Succeeds after a fixed delay.
struct SlowSource {
    platform: Platform,
    delay: Duration,
}

#[async_trait]
impl Source for SlowSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn fetch(&self, _topic: &str) -> Result<Vec<Post>, SourceError> {
        tokio::time::sleep(self.delay).await;
        Ok(vec![sample_post(self.platform, 0)])
    }
}

#[tokio::test]
async fn one_result_per_source_in_declared_order_despite_failures() {
    let aggregator = Aggregator::from_sources(vec![
        Box::new(StaticSource {
            platform: Platform::Reddit,
            post_count: 2,
        }),
        Box::new(FailingSource {
            platform: Platform::HackerNews,
        }),
        Box::new(StaticSource {
            platform: Platform::GitHub,
            post_count: 1,
        }),
        Box::new(FailingSource {
            platform: Platform::DevTo,
        }),
    ]);

    let results = aggregator.aggregate("rust").await;

    assert_eq!(results.len(), 4);
    assert_eq!(
        results.iter().map(|r| r.platform).collect::<Vec<_>>(),
        vec![
            Platform::Reddit,
            Platform::HackerNews,
            Platform::GitHub,
            Platform::DevTo,
        ]
    );
    assert!(results.iter().all(|r| r.query == "rust"));
}

#[tokio::test]
async fn failed_source_carries_error_and_empty_posts() {
    let aggregator = Aggregator::from_sources(vec![
        Box::new(StaticSource {
            platform: Platform::Reddit,
            post_count: 3,
        }),
        Box::new(FailingSource {
            platform: Platform::HackerNews,
        }),
    ]);

    let results = aggregator.aggregate("tokio").await;

    assert_eq!(results[0].posts.len(), 3);
    assert_eq!(results[0].error, None);

    assert!(results[1].posts.is_empty());
    let message = results[1].error.as_deref().expect("error should be set");
    assert!(!message.is_empty());
    assert!(message.contains("upstream unreachable"));
}

#[tokio::test]
async fn zero_hit_success_is_distinguishable_from_failure() {
    let aggregator = Aggregator::from_sources(vec![Box::new(StaticSource {
        platform: Platform::GitHub,
        post_count: 0,
    })]);

    let results = aggregator.aggregate("rust").await;

    assert_eq!(results.len(), 1);
    assert!(results[0].posts.is_empty());
    assert_eq!(results[0].error, None);
}

#[tokio::test]
async fn sources_run_concurrently_not_sequentially() {
    let delays = [100_u64, 200, 300, 400];
    let platforms = [
        Platform::Reddit,
        Platform::HackerNews,
        Platform::GitHub,
        Platform::DevTo,
    ];
    let sources: Vec<Box<dyn Source>> = platforms
        .iter()
        .zip(delays)
        .map(|(&platform, millis)| {
            Box::new(SlowSource {
                platform,
                delay: Duration::from_millis(millis),
            }) as Box<dyn Source>
        })
        .collect();
    let aggregator = Aggregator::from_sources(sources);

    let started = Instant::now();
    let results = aggregator.aggregate("rust").await;
    let elapsed = started.elapsed();

    assert_eq!(results.len(), 4);
    // Sequential execution would take ~1s (the sum); concurrent is bounded by
    // the slowest source (~400ms). Generous margin for scheduler noise.
    assert!(
        elapsed < Duration::from_millis(800),
        "expected concurrent fan-out, took {elapsed:?}"
    );
}

/// Mounts all four upstream endpoints on one mock server with static bodies.
async fn mock_all_platforms(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "children": [
                { "data": { "title": "r1", "permalink": "/r/rust/1", "ups": 1 } },
                { "data": { "title": "r2", "permalink": "/r/rust/2", "ups": 2 } }
            ] }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "hits": [ { "title": "h1", "objectID": "1" } ]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [ { "full_name": "a/b", "html_url": "https://github.com/a/b" } ]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "title": "d1", "url": "https://dev.to/a/d1" }
        ])))
        .mount(server)
        .await;
}

fn real_sources_against(uri: &str) -> Vec<Box<dyn Source>> {
    let config = FetchConfig::default();
    vec![
        Box::new(RedditSource::with_base_url(&config, uri).expect("reddit source")),
        Box::new(HackerNewsSource::with_base_url(&config, uri).expect("hn source")),
        Box::new(GitHubSource::with_base_url(&config, uri).expect("github source")),
        Box::new(DevToSource::with_base_url(&config, uri).expect("dev.to source")),
    ]
}

#[tokio::test]
async fn aggregate_is_shape_idempotent_against_static_upstreams() {
    let server = MockServer::start().await;
    mock_all_platforms(&server).await;

    let aggregator = Aggregator::from_sources(real_sources_against(&server.uri()));

    let first = aggregator.aggregate("rust").await;
    let second = aggregator.aggregate("rust").await;

    let shape = |results: &[devpulse_core::PlatformResult]| {
        results
            .iter()
            .map(|r| (r.platform, r.posts.len(), r.error.is_some()))
            .collect::<Vec<_>>()
    };
    assert_eq!(shape(&first), shape(&second));
    assert_eq!(first.len(), 4);
    assert_eq!(first[0].posts.len(), 2);
}

#[tokio::test]
async fn dead_upstream_does_not_mask_the_other_platforms() {
    let server = MockServer::start().await;
    mock_all_platforms(&server).await;

    // Point Hacker News at a closed port; the other three stay healthy.
    let config = FetchConfig::default();
    let sources: Vec<Box<dyn Source>> = vec![
        Box::new(RedditSource::with_base_url(&config, &server.uri()).expect("reddit source")),
        Box::new(
            HackerNewsSource::with_base_url(&config, "http://127.0.0.1:9").expect("hn source"),
        ),
        Box::new(GitHubSource::with_base_url(&config, &server.uri()).expect("github source")),
        Box::new(DevToSource::with_base_url(&config, &server.uri()).expect("dev.to source")),
    ];
    let aggregator = Aggregator::from_sources(sources);

    let results = aggregator.aggregate("rust").await;

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].posts.len(), 2);
    assert!(results[1].posts.is_empty());
    assert!(results[1].error.as_deref().is_some_and(|m| !m.is_empty()));
    assert_eq!(results[2].posts.len(), 1);
    assert_eq!(results[3].posts.len(), 1);
}

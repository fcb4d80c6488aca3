//! Topic aggregation across public developer platforms.
//!
//! Four source adapters (Reddit, Hacker News via Algolia, GitHub repository
//! search, Dev.to) each fetch one upstream search endpoint and normalize the
//! response into the shared [`Post`](devpulse_core::Post) shape. The
//! [`Aggregator`] fans out to every adapter concurrently and settles all
//! outcomes — one dead upstream never fails the aggregation.

pub mod aggregator;
pub mod error;
pub mod fetch;

mod sources;

pub use aggregator::Aggregator;
pub use error::SourceError;
pub use fetch::FetchConfig;
pub use sources::{DevToSource, GitHubSource, HackerNewsSource, RedditSource, Source};

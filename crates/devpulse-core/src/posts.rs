use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// The closed set of upstream platforms devpulse aggregates.
///
/// Serializes to the user-facing display name (`"Hacker News"`, not
/// `"HackerNews"`), matching what the search API reports to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Reddit,
    HackerNews,
    GitHub,
    DevTo,
}

impl Platform {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Platform::Reddit => "Reddit",
            Platform::HackerNews => "Hacker News",
            Platform::GitHub => "GitHub",
            Platform::DevTo => "Dev.to",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Raw engagement counters as reported by the upstream platform.
///
/// Semantics are deliberately platform-specific: `likes` means upvotes on
/// Reddit, points on Hacker News, stars on GitHub, and reactions on Dev.to.
/// No cross-platform normalization is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Engagement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<u64>,
}

impl Engagement {
    /// Builds an engagement record from like/comment counts, returning `None`
    /// when the upstream reported neither.
    #[must_use]
    pub fn from_counts(likes: Option<u64>, comments: Option<u64>) -> Option<Self> {
        if likes.is_none() && comments.is_none() {
            return None;
        }
        Some(Self {
            likes,
            comments,
            shares: None,
        })
    }
}

/// One normalized content item, regardless of source platform.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub platform: Platform,
    /// Display title; adapters substitute `"Untitled"` when the upstream
    /// item has none.
    pub title: String,
    /// Free-text body; may be empty when the upstream has neither a body
    /// nor a title to fall back on.
    pub content: String,
    /// Canonical absolute link to the item.
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement: Option<Engagement>,
}

/// Outcome of one adapter invocation.
///
/// Either `posts` (possibly empty) with no `error`, or empty `posts` with a
/// non-empty `error` message — never both. An empty post list with no error
/// is a genuine zero-hit result, not a failure.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformResult {
    /// The topic that was searched, echoed back for traceability.
    pub query: String,
    pub platform: Platform,
    pub posts: Vec<Post>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

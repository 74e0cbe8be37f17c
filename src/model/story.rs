use chrono::{DateTime, Utc};
use thiserror::Error;
use url::Url;

use crate::api::wire::StoryRecord;
use crate::api::{ApiClient, ApiError};

/// Display value used when a story URL cannot be parsed.
pub const HOST_PLACEHOLDER: &str = "unknown-host";

/// A story URL that cannot yield a hostname.
#[derive(Debug, Error)]
pub enum MalformedUrl {
    /// Not a well-formed absolute URL (includes scheme-less input like
    /// `example.com/page`, which parses as a relative reference).
    #[error("failed to parse story URL: {0}")]
    Unparseable(#[from] url::ParseError),

    /// Parsed, but the scheme carries no host (e.g. `mailto:`).
    #[error("story URL has no host component")]
    MissingHost,
}

/// A single submitted story.
///
/// Constructed only from service records, never from local drafts, so the
/// fields always reflect what the server persisted. Values are not mutated
/// after construction; stories leave the system only by being dropped from
/// a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    pub story_id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<StoryRecord> for Story {
    fn from(record: StoryRecord) -> Self {
        Self {
            story_id: record.story_id,
            title: record.title,
            author: record.author,
            url: record.url,
            username: record.username,
            created_at: record.created_at,
        }
    }
}

impl Story {
    /// Fetch a single story by id.
    ///
    /// A stale or unknown id surfaces as [`ApiError::NotFound`].
    pub async fn fetch(client: &ApiClient, story_id: &str) -> Result<Self, ApiError> {
        Ok(client.get_story(story_id).await?.into())
    }

    /// The host component of the story URL, e.g. `www.example.com`.
    pub fn host(&self) -> Result<String, MalformedUrl> {
        host_of(&self.url)
    }

    /// Infallible display form of the host for render paths.
    #[must_use]
    pub fn host_or_placeholder(&self) -> String {
        self.host()
            .unwrap_or_else(|_| HOST_PLACEHOLDER.to_string())
    }
}

fn host_of(raw: &str) -> Result<String, MalformedUrl> {
    let parsed = Url::parse(raw)?;
    parsed
        .host_str()
        .map(str::to_string)
        .ok_or(MalformedUrl::MissingHost)
}

//! Wire-format payloads exchanged with the story service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One story as the service represents it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRecord {
    pub story_id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// One user as the service represents it.
///
/// The service calls the user's submissions `stories`; locally they are
/// `own_stories` to keep them apart from the global story list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub favorites: Vec<StoryRecord>,
    #[serde(default, rename = "stories")]
    pub own_stories: Vec<StoryRecord>,
}

/// A story as submitted by the client, before the service assigns an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryDraft {
    pub title: String,
    pub author: String,
    pub url: String,
}

/// Response to a successful signup or login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: UserRecord,
    pub token: String,
}

// Response envelopes. The service wraps every payload in a keyed object.

#[derive(Debug, Deserialize)]
pub(crate) struct StoriesResponse {
    pub stories: Vec<StoryRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StoryResponse {
    pub story: StoryRecord,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserResponse {
    pub user: UserRecord,
}

// Request bodies.

#[derive(Debug, Serialize)]
pub(crate) struct PublishRequest<'a> {
    pub token: &'a str,
    pub story: &'a StoryDraft,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignupRequest<'a> {
    pub user: SignupUser<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignupUser<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub user: LoginUser<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginUser<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body carrying only the session token, used by favorite mutations.
#[derive(Debug, Serialize)]
pub(crate) struct TokenBody<'a> {
    pub token: &'a str,
}

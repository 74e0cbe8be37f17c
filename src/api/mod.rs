//! HTTP client facade for the story service.
//!
//! Owns the transport: one [`ApiClient`] per session context, wrapping a
//! configured `reqwest::Client` and the service base URL. Every method maps
//! one remote operation to typed wire payloads and the [`ApiError`]
//! taxonomy; nothing above this module touches HTTP directly.

mod error;
pub mod wire;

pub use error::ApiError;

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::constants::CLIENT_USER_AGENT;
use wire::{
    AuthResponse, LoginRequest, LoginUser, PublishRequest, SignupRequest, SignupUser,
    StoriesResponse, StoryDraft, StoryRecord, StoryResponse, TokenBody, UserRecord, UserResponse,
};

/// Client for the story service API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the service at `base_url` with default timeouts.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeouts(base_url, Duration::from_secs(30), Duration::from_secs(10))
    }

    /// Create a client from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::with_timeouts(
            config.api_base_url.clone(),
            config.request_timeout,
            config.connect_timeout,
        )
    }

    fn with_timeouts(
        base_url: impl Into<String>,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Self {
        let http = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .user_agent(CLIENT_USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the global story list, in server order.
    pub async fn list_stories(&self) -> Result<Vec<StoryRecord>, ApiError> {
        let url = format!("{}/stories", self.base_url);
        debug!(url = %url, "Fetching story list");

        let response = self.http.get(&url).send().await.map_err(ApiError::Network)?;
        let body: StoriesResponse = decode(response).await?;
        Ok(body.stories)
    }

    /// Fetch a single story by id.
    pub async fn get_story(&self, story_id: &str) -> Result<StoryRecord, ApiError> {
        let url = format!("{}/stories/{story_id}", self.base_url);
        debug!(url = %url, "Fetching story");

        let response = self.http.get(&url).send().await.map_err(ApiError::Network)?;
        let body: StoryResponse = decode(response).await?;
        Ok(body.story)
    }

    /// Create a story from a draft; returns the service's canonical record.
    pub async fn create_story(
        &self,
        token: &str,
        draft: &StoryDraft,
    ) -> Result<StoryRecord, ApiError> {
        let url = format!("{}/stories", self.base_url);
        debug!(url = %url, title = %draft.title, "Publishing story");

        let response = self
            .http
            .post(&url)
            .json(&PublishRequest { token, story: draft })
            .send()
            .await
            .map_err(ApiError::Network)?;
        let body: StoryResponse = decode(response).await?;
        Ok(body.story)
    }

    /// Register a new account.
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthResponse, ApiError> {
        let url = format!("{}/signup", self.base_url);
        debug!(url = %url, username = %username, "Signing up");

        let response = self
            .http
            .post(&url)
            .json(&SignupRequest {
                user: SignupUser {
                    username,
                    password,
                    name,
                },
            })
            .send()
            .await
            .map_err(ApiError::Network)?;
        decode(response).await
    }

    /// Authenticate an existing account.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let url = format!("{}/login", self.base_url);
        debug!(url = %url, username = %username, "Logging in");

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest {
                user: LoginUser { username, password },
            })
            .send()
            .await
            .map_err(ApiError::Network)?;
        decode(response).await
    }

    /// Fetch a user record, authenticating with a previously issued token.
    ///
    /// The service takes the token as a query parameter on this endpoint.
    pub async fn fetch_user(&self, token: &str, username: &str) -> Result<UserRecord, ApiError> {
        let url = format!("{}/users/{username}", self.base_url);
        debug!(url = %url, "Fetching user");

        let response = self
            .http
            .get(&url)
            .query(&[("token", token)])
            .send()
            .await
            .map_err(ApiError::Network)?;
        let body: UserResponse = decode(response).await?;
        Ok(body.user)
    }

    /// Mark a story as a favorite of `username`.
    ///
    /// Only the status matters to callers; the response body is discarded.
    pub async fn add_favorite(
        &self,
        token: &str,
        username: &str,
        story_id: &str,
    ) -> Result<(), ApiError> {
        let url = format!("{}/users/{username}/favorites/{story_id}", self.base_url);
        debug!(url = %url, "Adding favorite");

        let response = self
            .http
            .post(&url)
            .json(&TokenBody { token })
            .send()
            .await
            .map_err(ApiError::Network)?;
        check_status(response).await
    }

    /// Remove a story from the favorites of `username`.
    pub async fn remove_favorite(
        &self,
        token: &str,
        username: &str,
        story_id: &str,
    ) -> Result<(), ApiError> {
        let url = format!("{}/users/{username}/favorites/{story_id}", self.base_url);
        debug!(url = %url, "Removing favorite");

        let response = self
            .http
            .delete(&url)
            .json(&TokenBody { token })
            .send()
            .await
            .map_err(ApiError::Network)?;
        check_status(response).await
    }
}

/// Categorize a non-success response, then decode the body as `T`.
///
/// The body is read as text first so decode failures can be told apart
/// from transport failures.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response.text().await.map_err(ApiError::Network)?;

    if !status.is_success() {
        return Err(ApiError::from_status(status, &text));
    }

    serde_json::from_str(&text).map_err(ApiError::Decode)
}

/// Categorize a non-success response, discarding any success body.
async fn check_status(response: Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let text = response.text().await.map_err(ApiError::Network)?;
    Err(ApiError::from_status(status, &text))
}

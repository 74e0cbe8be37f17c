use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::api::wire::UserRecord;
use crate::api::{ApiClient, ApiError};

use super::favorites::Favorites;
use super::story::Story;

/// Whether a story is currently favorited by a given user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteState {
    Favorited,
    NotFavorited,
}

/// The authenticated user of the current session.
///
/// Owns the session token and the favorites collection. Favorite
/// mutations follow confirm-then-commit: the remote call is awaited to
/// completion and only a confirmed success mutates local state, so a
/// failed call leaves `favorites` exactly as it was.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub own_stories: Vec<Story>,
    favorites: Favorites,
    token: String,
}

impl User {
    pub(crate) fn from_record(record: UserRecord, token: String) -> Self {
        Self {
            username: record.username,
            name: record.name,
            created_at: record.created_at,
            own_stories: record.own_stories.into_iter().map(Story::from).collect(),
            favorites: Favorites::from_stories(record.favorites.into_iter().map(Story::from)),
            token,
        }
    }

    /// The session token, required by every mutating call.
    ///
    /// An empty token means the session was constructed from bad stored
    /// state; surfacing [`ApiError::Auth`] here keeps the request from
    /// ever being issued.
    pub fn token(&self) -> Result<&str, ApiError> {
        if self.token.is_empty() {
            return Err(ApiError::missing_token());
        }
        Ok(&self.token)
    }

    /// The user's favorites, most recently added first.
    pub fn favorites(&self) -> &[Story] {
        self.favorites.as_slice()
    }

    /// O(1) membership check by story id.
    #[must_use]
    pub fn is_favorite(&self, story_id: &str) -> bool {
        self.favorites.contains(story_id)
    }

    #[must_use]
    pub fn favorite_state(&self, story_id: &str) -> FavoriteState {
        if self.is_favorite(story_id) {
            FavoriteState::Favorited
        } else {
            FavoriteState::NotFavorited
        }
    }

    /// Mark `story` as a favorite.
    ///
    /// Idempotent from the caller's perspective: if the story is already
    /// favorited the call returns `Ok` without issuing a request, so a
    /// double invocation can neither waste a round-trip nor create a
    /// duplicate entry even against a non-idempotent server.
    pub async fn add_favorite(&mut self, client: &ApiClient, story: &Story) -> Result<(), ApiError> {
        if self.favorites.contains(&story.story_id) {
            debug!(story_id = %story.story_id, "Already favorited, skipping remote call");
            return Ok(());
        }

        let token = self.token()?;
        client
            .add_favorite(token, &self.username, &story.story_id)
            .await?;

        self.favorites.insert_front(story.clone());
        info!(story_id = %story.story_id, "Favorite added");
        Ok(())
    }

    /// Remove `story` from the favorites.
    ///
    /// Matching is by `story_id` equality, not instance identity: the
    /// story passed in may be a different copy than the one stored.
    pub async fn delete_favorite(
        &mut self,
        client: &ApiClient,
        story: &Story,
    ) -> Result<(), ApiError> {
        let token = self.token()?;
        client
            .remove_favorite(token, &self.username, &story.story_id)
            .await?;

        self.favorites.remove(&story.story_id);
        info!(story_id = %story.story_id, "Favorite removed");
        Ok(())
    }

    /// Flip the favorite state of `story`, returning the resulting state.
    pub async fn toggle_favorite(
        &mut self,
        client: &ApiClient,
        story: &Story,
    ) -> Result<FavoriteState, ApiError> {
        if self.is_favorite(&story.story_id) {
            self.delete_favorite(client, story).await?;
            Ok(FavoriteState::NotFavorited)
        } else {
            self.add_favorite(client, story).await?;
            Ok(FavoriteState::Favorited)
        }
    }
}

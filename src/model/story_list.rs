use tracing::{debug, info};

use crate::api::wire::StoryDraft;
use crate::api::{ApiClient, ApiError};

use super::story::Story;
use super::user::User;

/// The global list of stories, in server order.
///
/// One instance per fetch. A publish mutates the same instance by
/// prepending the newly created story.
#[derive(Debug, Clone, Default)]
pub struct StoryList {
    pub stories: Vec<Story>,
}

impl StoryList {
    /// Fetch the story list from the service, preserving server order.
    pub async fn fetch(client: &ApiClient) -> Result<Self, ApiError> {
        let records = client.list_stories().await?;
        debug!(count = records.len(), "Fetched story list");

        Ok(Self {
            stories: records.into_iter().map(Story::from).collect(),
        })
    }

    /// Publish a draft as `user`, prepend the created story, and return it.
    ///
    /// The returned story is built from the service's canonical response,
    /// not the draft, so server-side normalization is reflected locally.
    /// Callers relying on the previous length must snapshot it before
    /// calling.
    pub async fn publish(
        &mut self,
        client: &ApiClient,
        user: &User,
        draft: &StoryDraft,
    ) -> Result<Story, ApiError> {
        let record = client.create_story(user.token()?, draft).await?;
        let story = Story::from(record);
        info!(story_id = %story.story_id, username = %user.username, "Story published");

        self.stories.insert(0, story.clone());
        Ok(story)
    }
}

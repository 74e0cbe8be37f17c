//! Integration tests for fetching and publishing stories.

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storynest::api::{ApiClient, ApiError};
use storynest::model::{Story, StoryDraft, StoryList};
use storynest::session;

fn story_json(id: &str, title: &str, url: &str) -> Value {
    json!({
        "storyId": id,
        "title": title,
        "author": "Test Author",
        "url": url,
        "username": "alice",
        "createdAt": "2024-01-01T00:00:00.000Z"
    })
}

/// Mount a login mock and resolve a user through it.
async fn login_user(server: &MockServer, token: &str) -> storynest::model::User {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {
                "username": "alice",
                "name": "Alice",
                "createdAt": "2024-01-01T00:00:00.000Z",
                "favorites": [],
                "stories": []
            },
            "token": token
        })))
        .mount(server)
        .await;

    let client = ApiClient::new(server.uri());
    session::login(&client, "alice", "secret")
        .await
        .expect("login failed")
}

#[tokio::test]
async fn test_fetch_preserves_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stories": [
                story_json("s3", "Third", "https://c.example.com/3"),
                story_json("s1", "First", "https://a.example.com/1"),
                story_json("s2", "Second", "https://b.example.com/2"),
            ]
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let list = StoryList::fetch(&client).await.expect("fetch failed");

    let ids: Vec<&str> = list.stories.iter().map(|s| s.story_id.as_str()).collect();
    assert_eq!(ids, ["s3", "s1", "s2"], "server order must be preserved");
    assert!(list.stories.iter().all(|s| !s.story_id.is_empty()));
}

#[tokio::test]
async fn test_fetch_server_error_is_categorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stories"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let err = StoryList::fetch(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 500, .. }));
}

#[tokio::test]
async fn test_fetch_transport_failure_is_network_error() {
    // Nothing listens on the discard port, so the connection is refused.
    let client = ApiClient::new("http://127.0.0.1:9");
    let err = StoryList::fetch(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn test_fetch_undecodable_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let err = StoryList::fetch(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_publish_prepends_canonical_story() {
    let server = MockServer::start().await;
    let user = login_user(&server, "tok-1").await;

    Mock::given(method("GET"))
        .and(path("/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stories": [story_json("s1", "Existing", "https://a.example.com/1")]
        })))
        .mount(&server)
        .await;

    // The service normalizes the title; the local list must reflect the
    // canonical response, not the draft.
    Mock::given(method("POST"))
        .and(path("/stories"))
        .and(body_partial_json(json!({
            "token": "tok-1",
            "story": {"title": "my new story"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "story": story_json("server-id-9", "My New Story", "https://b.example.com/new")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let mut list = StoryList::fetch(&client).await.expect("fetch failed");
    let len_before = list.stories.len();

    let draft = StoryDraft {
        title: "my new story".to_string(),
        author: "Test Author".to_string(),
        url: "https://b.example.com/new".to_string(),
    };
    let created = list
        .publish(&client, &user, &draft)
        .await
        .expect("publish failed");

    assert_eq!(list.stories.len(), len_before + 1);
    assert_eq!(created.story_id, "server-id-9", "id must come from the server");
    assert_eq!(created.title, "My New Story");
    assert_eq!(list.stories[0], created, "new story must be the first element");
}

#[tokio::test]
async fn test_publish_validation_error_leaves_list_unchanged() {
    let server = MockServer::start().await;
    let user = login_user(&server, "tok-1").await;

    Mock::given(method("GET"))
        .and(path("/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stories": [story_json("s1", "Existing", "https://a.example.com/1")]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/stories"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"message": "url is not a valid URL"}
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let mut list = StoryList::fetch(&client).await.expect("fetch failed");

    let draft = StoryDraft {
        title: "bad".to_string(),
        author: "Test Author".to_string(),
        url: "not-a-url".to_string(),
    };
    let err = list.publish(&client, &user, &draft).await.unwrap_err();

    assert!(matches!(err, ApiError::Validation { .. }));
    assert_eq!(list.stories.len(), 1, "failed publish must not grow the list");
}

#[tokio::test]
async fn test_publish_rejected_token_is_auth_error() {
    let server = MockServer::start().await;
    let user = login_user(&server, "expired-tok").await;

    Mock::given(method("POST"))
        .and(path("/stories"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "invalid token"}
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let mut list = StoryList::default();

    let draft = StoryDraft {
        title: "t".to_string(),
        author: "a".to_string(),
        url: "https://example.com".to_string(),
    };
    let err = list.publish(&client, &user, &draft).await.unwrap_err();
    assert!(matches!(err, ApiError::Auth { .. }));
    assert!(list.stories.is_empty());
}

#[tokio::test]
async fn test_fetch_story_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stories/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "story": story_json("s1", "One Story", "https://a.example.com/1")
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let story = Story::fetch(&client, "s1").await.expect("fetch failed");
    assert_eq!(story.story_id, "s1");
    assert_eq!(story.title, "One Story");
}

#[tokio::test]
async fn test_fetch_story_by_stale_id_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stories/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"message": "No story found with ID gone"}
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let err = Story::fetch(&client, "gone").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

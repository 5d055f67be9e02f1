//! Wire-level tests of the HTTP content store against a mock server

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use headless_blog::config::{SiteConfig, StoreConfig};
use headless_blog::content::{ContentAccess, Kind};
use headless_blog::store::{ContentStore, HttpStore, Query};

const OBJECTS_PATH: &str = "/v3/buckets/test-bucket/objects";

fn store_config(server: &MockServer) -> StoreConfig {
    StoreConfig {
        bucket_slug: "test-bucket".to_string(),
        read_key: "read-123".to_string(),
        api_url: Some(server.uri()),
        timeout_secs: 5,
        ..StoreConfig::default()
    }
}

fn access(server: &MockServer) -> ContentAccess {
    let store = HttpStore::new(&store_config(server)).unwrap();
    ContentAccess::new(Arc::new(store))
}

fn expanded_post(id: &str, date: &str) -> serde_json::Value {
    json!({
        "id": id,
        "slug": id,
        "title": id,
        "metadata": {
            "content": "Hello",
            "author": { "id": "a1", "slug": "jane", "title": "Jane", "metadata": {} },
            "categories": [],
            "publication_date": date
        }
    })
}

#[tokio::test]
async fn list_posts_sends_query_props_and_depth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(OBJECTS_PATH))
        .and(query_param("read_key", "read-123"))
        .and(query_param("query", r#"{"type":"posts"}"#))
        .and(query_param("props", "id,title,slug,metadata"))
        .and(query_param("depth", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [
                expanded_post("old", "2023-05-01"),
                expanded_post("new", "2024-05-01")
            ],
            "total": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let posts = access(&server).posts().await.unwrap();
    let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["new", "old"]);
}

#[tokio::test]
async fn featured_filter_is_sent_to_the_store() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(OBJECTS_PATH))
        .and(query_param(
            "query",
            r#"{"type":"posts","metadata.featured":true}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "objects": [] })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(access(&server).featured_posts().await.unwrap().is_empty());
}

#[tokio::test]
async fn single_lookup_uses_slug_and_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(OBJECTS_PATH))
        .and(query_param("query", r#"{"type":"authors","slug":"jane"}"#))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [{
                "id": "a1", "slug": "jane", "title": "Jane", "type": "authors",
                "created_at": "2024-01-01T00:00:00.000Z",
                "metadata": { "bio": "Hi", "linkedin": "https://linkedin.com/in/jane" }
            }]
        })))
        .mount(&server)
        .await;

    let author = access(&server).author("jane").await.unwrap().unwrap();
    assert_eq!(author.kind, Some(Kind::Author));
    assert_eq!(author.bio(), Some("Hi"));
    assert_eq!(author.linkedin(), Some("https://linkedin.com/in/jane"));
}

#[tokio::test]
async fn not_found_response_becomes_absence() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(OBJECTS_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": 404,
            "message": "No objects found for your query"
        })))
        .mount(&server)
        .await;

    let access = access(&server);
    assert!(access.post("does-not-exist").await.unwrap().is_none());
    assert!(access.posts_by_author("a1").await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_single_lookup_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(OBJECTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "objects": [] })))
        .mount(&server)
        .await;

    let store = HttpStore::new(&store_config(&server)).unwrap();
    let err = store
        .find_one(&Query::new(Kind::Post).filter("slug", "nope"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn server_error_keeps_status_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(OBJECTS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": 500,
            "message": "Internal error"
        })))
        .mount(&server)
        .await;

    let store = HttpStore::new(&store_config(&server)).unwrap();
    let err = store.find(&Query::new(Kind::Category)).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("Internal error"));

    let err = access(&server).categories().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch categories");
}

#[tokio::test]
async fn unauthorized_is_a_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(OBJECTS_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("denied"))
        .mount(&server)
        .await;

    let err = access(&server).post("anything").await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch post");
}

#[tokio::test]
async fn malformed_body_is_a_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(OBJECTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = access(&server).authors().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch authors");
}

#[tokio::test]
async fn timeout_is_a_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(OBJECTS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "objects": [] }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = StoreConfig {
        timeout_secs: 1,
        ..store_config(&server)
    };
    let access = ContentAccess::new(Arc::new(HttpStore::new(&config).unwrap()));
    let err = access.posts().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch posts");
}

#[test]
fn site_config_feeds_the_client() {
    let mut config = SiteConfig::default();
    config.store.bucket_slug = "b".to_string();
    config.store.read_key = "k".to_string();
    assert!(HttpStore::new(&config.store).is_ok());
}

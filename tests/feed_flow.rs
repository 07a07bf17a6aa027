mod common;

use std::sync::Arc;

use serde_json::json;
use unigram_client::ApiError;
use unigram_client::models::image::ImageFile;
use unigram_client::services::feed::Feed;
use unigram_client::services::post_view::PostView;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{ME, bearer, logged_in};

async fn mount_feed(server: &MockServer, notifications: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .and(header("authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "p1", "userId": "owner", "caption": "count", "likes": 4 },
            { "_id": "p2", "userId": { "_id": "owner2", "name": "Devi" }, "likes": ["u1", "u2"] },
            { "_id": "p3", "userId": "owner", "username": "Arun", "likes": ["u1", "u2"],
              "comments": [{ "_id": "c0", "username": "Arun", "text": "hi" }] }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/api/notifications/{}", ME)))
        .respond_with(ResponseTemplate::new(200).set_body_json(notifications))
        .mount(server)
        .await;
}

async fn loaded_feed(server: &MockServer, notifications: serde_json::Value) -> Feed {
    mount_feed(server, notifications).await;
    let api = logged_in(server);
    let mut feed = Feed::new(api.clone(), Arc::new(api));
    feed.load().await.unwrap();
    feed
}

#[tokio::test]
async fn feed_normalizes_mixed_payloads() {
    let server = MockServer::start().await;
    let feed = loaded_feed(&server, json!([])).await;

    let counts: Vec<u64> = feed.posts.iter().map(|p| p.likes_count()).collect();
    assert_eq!(counts, vec![4, 2, 2]);

    assert_eq!(feed.posts[0].liked_by("u1"), None);
    assert_eq!(feed.posts[1].liked_by("u1"), Some(true));
    assert_eq!(feed.posts[2].liked_by(ME), Some(false));

    assert_eq!(feed.posts[0].username, "Unknown User");
    assert_eq!(feed.posts[1].username, "Devi");
    assert_eq!(feed.posts[2].username, "Arun");
    assert!(!feed.loading);
    assert!(feed.error.is_none());
    assert!(!feed.has_unread());
}

#[tokio::test]
async fn unread_notification_lights_indicator_on_load() {
    let server = MockServer::start().await;
    let feed = loaded_feed(
        &server,
        json!([{ "_id": "n1", "type": "like", "read": true }, { "_id": "n2", "type": "comment", "read": false }]),
    )
    .await;
    assert!(feed.has_unread());
}

#[tokio::test]
async fn backend_error_message_is_shown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "db down" })))
        .mount(&server)
        .await;

    let api = logged_in(&server);
    let mut feed = Feed::new(api.clone(), Arc::new(api));
    assert!(matches!(feed.load().await, Err(ApiError::Application { .. })));
    assert_eq!(feed.error.as_deref(), Some("db down"));
    assert!(!feed.loading);
}

#[tokio::test]
async fn like_from_post_view_reaches_feed_and_notifies_owner() {
    let server = MockServer::start().await;
    let mut feed = loaded_feed(&server, json!([])).await;

    Mock::given(method("PUT"))
        .and(path("/api/posts/p2/like"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "likesCount": 3, "liked": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/notifications"))
        .and(body_json(json!({
            "userId": "owner2", "fromUser": ME, "type": "like", "postId": "p2", "commentId": null
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = PostView::new(feed.post("p2").unwrap().clone(), Some(ME));
    let (update, liked) = view.toggle_like(feed.api()).await.unwrap();
    assert_eq!(view.likes_count, 3);
    assert!(view.liked);

    feed.apply_like("p2", update, Some(liked)).settle().await;
    assert_eq!(feed.post("p2").unwrap().likes_count(), 3);
    assert!(feed.has_unread());
}

#[tokio::test]
async fn unlike_sends_no_notification() {
    let server = MockServer::start().await;
    let mut feed = loaded_feed(&server, json!([])).await;

    Mock::given(method("PUT"))
        .and(path("/api/posts/p1/like"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "likesCount": 3, "liked": false })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/notifications"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    feed.toggle_like("p1").await.unwrap().settle().await;
    assert_eq!(feed.post("p1").unwrap().likes_count(), 3);
}

#[tokio::test]
async fn comment_replaces_list_and_notifies_with_last_comment() {
    let server = MockServer::start().await;
    let mut feed = loaded_feed(&server, json!([])).await;

    Mock::given(method("POST"))
        .and(path("/api/posts/p3/comment"))
        .and(body_json(json!({ "text": "nice" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "c1", "username": "Someone", "text": "first" },
            { "_id": "c2", "username": "Me", "text": "nice" }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/notifications"))
        .and(body_json(json!({
            "userId": "owner", "fromUser": ME, "type": "comment", "postId": "p3", "commentId": "c2"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    feed.add_comment("p3", "nice").await.unwrap().settle().await;

    let texts: Vec<&str> = feed.post("p3").unwrap().comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "nice"]);
}

#[tokio::test]
async fn like_on_own_post_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "_id": "mine", "userId": ME, "likes": [] }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/notifications/{}", ME)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/posts/mine/like"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "likesCount": 1, "liked": true })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/notifications"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let api = logged_in(&server);
    let mut feed = Feed::new(api.clone(), Arc::new(api));
    feed.load().await.unwrap();
    let out = feed.toggle_like("mine").await.unwrap();
    assert!(!out.is_sent());
    assert_eq!(feed.post("mine").unwrap().likes_count(), 1);
    assert!(!feed.has_unread());
}

#[tokio::test]
async fn failed_notification_does_not_undo_like() {
    let server = MockServer::start().await;
    let mut feed = loaded_feed(&server, json!([])).await;

    Mock::given(method("PUT"))
        .and(path("/api/posts/p1/like"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "likesCount": 5, "liked": true })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/notifications"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    feed.toggle_like("p1").await.unwrap().settle().await;
    assert_eq!(feed.post("p1").unwrap().likes_count(), 5);
    assert!(!feed.has_unread());
}

#[tokio::test]
async fn created_post_is_prepended_normalized() {
    let server = MockServer::start().await;
    let mut feed = loaded_feed(&server, json!([])).await;

    Mock::given(method("POST"))
        .and(path("/api/posts"))
        .and(header("authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "new", "caption": "hello", "userId": { "_id": ME, "name": "Me" }, "likes": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let image = ImageFile::new(vec![0x89, 0x50, 0x4e, 0x47], "pic.png", "image/png").unwrap();
    let created = feed.create_post(Some(&image), "hello").await.unwrap();
    assert_eq!(created.id, "new");
    assert_eq!(created.username, "Me");
    assert_eq!(feed.posts.len(), 4);
    assert_eq!(feed.posts[0].id, "new");
}

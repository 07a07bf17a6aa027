mod common;

use serde_json::json;
use unigram_client::models::image::ImageFile;
use unigram_client::models::user::ProfileForm;
use unigram_client::repositories::image_host::ImageHost;
use unigram_client::services::profile_services::ProfileService;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{ME, bearer, logged_in};

fn service(server: &MockServer) -> ProfileService {
    let images = ImageHost::new(reqwest::Client::new(), &server.uri(), "demo", "unsigned");
    ProfileService::new(logged_in(server), images)
}

fn form() -> ProfileForm {
    ProfileForm {
        bio: "hello".into(),
        department: "CSE".into(),
        pronoun: "they/them".into(),
        linkedin: String::new(),
        instagram: String::new(),
        profile_image_url: "https://img.example/old.jpg".into(),
    }
}

fn avatar() -> ImageFile {
    ImageFile::new(vec![0xff, 0xd8, 0xff], "me.jpg", "image/jpeg").unwrap()
}

#[tokio::test]
async fn loads_user_and_posts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/users/{}", ME)))
        .and(header("authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": ME, "name": "Asha", "bio": "hi", "profileImageUrl": ""
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/posts/user/{}", ME)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "a", "userId": ME, "likes": 3 },
            { "_id": "b", "userId": ME, "likes": [ME] }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let page = service(&server).load_profile(ME).await.unwrap();
    assert!(page.is_own_profile);
    assert_eq!(page.user.display_name(), "Asha");
    assert_eq!(page.user.avatar_url(), unigram_client::models::post::DEFAULT_PROFILE_IMAGE_URL);
    assert_eq!(page.posts.len(), 2);
    assert_eq!(page.posts[0].likes_count(), 3);
    assert_eq!(page.posts[1].liked_by(ME), Some(true));
    assert_eq!(page.position_of("b"), Some(1));
}

#[tokio::test]
async fn null_post_list_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/u2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "_id": "u2" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/posts/user/u2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let page = service(&server).load_profile("u2").await.unwrap();
    assert!(!page.is_own_profile);
    assert!(page.posts.is_empty());
    assert_eq!(page.user.display_name(), "Unknown User");
}

#[tokio::test]
async fn failed_upload_still_saves_profile() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1_1/demo/image/upload"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": { "message": "bad preset" } })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/api/users/{}", ME)))
        .and(body_json(json!({
            "bio": "hello", "department": "CSE", "pronoun": "they/them",
            "linkedin": "", "instagram": "", "profileImageUrl": "https://img.example/old.jpg"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let saved = service(&server).save_profile(ME, &form(), Some(&avatar())).await.unwrap();
    assert_eq!(saved.profile_image_url, "https://img.example/old.jpg");
}

#[tokio::test]
async fn uploaded_avatar_url_is_saved() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1_1/demo/image/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secure_url": "https://img.example/new.jpg", "public_id": "x"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/api/users/{}", ME)))
        .and(body_json(json!({
            "bio": "hello", "department": "CSE", "pronoun": "they/them",
            "linkedin": "", "instagram": "", "profileImageUrl": "https://img.example/new.jpg"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let saved = service(&server).save_profile(ME, &form(), Some(&avatar())).await.unwrap();
    assert_eq!(saved.profile_image_url, "https://img.example/new.jpg");
}

#[tokio::test]
async fn removed_photo_saves_empty_url() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/api/users/{}", ME)))
        .and(body_json(json!({
            "bio": "hello", "department": "CSE", "pronoun": "they/them",
            "linkedin": "", "instagram": "", "profileImageUrl": ""
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut edited = form();
    edited.remove_photo();
    let saved = service(&server).save_profile(ME, &edited, None).await.unwrap();
    assert!(saved.profile_image_url.is_empty());
}

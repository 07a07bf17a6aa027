// src/repositories/api_client.rs - REST calls against the unigram backend

use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::dtos::notification_dtos::{CreateNotificationDTO, NotificationIn};
use crate::dtos::post_dtos::{CommentIn, CreateCommentDTO, LikeToggleOut, PostIn};
use crate::dtos::profile_dtos::{UpdateProfileDTO, UserIn};
use crate::error::{ApiError, ApiResult};
use crate::models::image::ImageFile;
use crate::session::{Session, mask_token};

/// Thin typed wrapper over the backend's endpoints. Holds the session it was
/// given; a missing token fails authenticated calls before any request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(http: Client, base_url: impl Into<String>, session: Session) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn set_session(&mut self, session: Session) {
        self.session = session;
    }

    pub fn current_user_id(&self) -> Option<String> {
        self.session.current_user_id()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let token = self.session.bearer()?;
        let url = self.url(path);
        debug!("{} {} (token {})", method, url, mask_token(token));
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    async fn read_json<T: DeserializeOwned>(req: RequestBuilder, fallback: &str) -> ApiResult<T> {
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            warn!("request failed: {} - {}", status, truncate(&body));
            return Err(ApiError::from_body(status, &body, fallback));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// For endpoints whose response body we don't use.
    async fn expect_success(req: RequestBuilder, fallback: &str) -> ApiResult<()> {
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!("request failed: {} - {}", status, truncate(&body));
            return Err(ApiError::from_body(status, &body, fallback));
        }
        Ok(())
    }

    // ---- auth (no token) ----

    pub async fn auth_post<B, T>(&self, endpoint: &str, body: &B, fallback: &str) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(&format!("/auth/{}", endpoint));
        debug!("POST {}", url);
        Self::read_json(self.http.post(url).json(body), fallback).await
    }

    // ---- posts ----

    pub async fn list_posts(&self) -> ApiResult<Vec<PostIn>> {
        let req = self.authed(Method::GET, "/posts")?;
        Self::read_json(req, "Failed to fetch feed data").await
    }

    pub async fn list_user_posts(&self, user_id: &str) -> ApiResult<Vec<PostIn>> {
        let path = format!("/posts/user/{}", urlencoding::encode(user_id));
        let req = self.authed(Method::GET, &path)?;
        let posts: Option<Vec<PostIn>> = Self::read_json(req, "Error loading profile").await?;
        Ok(posts.unwrap_or_default())
    }

    pub async fn create_post(&self, image: &ImageFile, caption: &str) -> ApiResult<PostIn> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(image.content_type.as_ref())?;
        let form = Form::new()
            .part("image", part)
            .text("caption", caption.to_string());

        let req = self.authed(Method::POST, "/posts")?.multipart(form);
        Self::read_json(req, "Failed to create post").await
    }

    pub async fn toggle_like(&self, post_id: &str) -> ApiResult<LikeToggleOut> {
        let path = format!("/posts/{}/like", urlencoding::encode(post_id));
        let req = self.authed(Method::PUT, &path)?;
        Self::read_json(req, "Failed to like/unlike post").await
    }

    /// Returns the post's full comment list after the addition.
    pub async fn add_comment(&self, post_id: &str, text: &str) -> ApiResult<Vec<CommentIn>> {
        let path = format!("/posts/{}/comment", urlencoding::encode(post_id));
        let req = self
            .authed(Method::POST, &path)?
            .json(&CreateCommentDTO { text });
        Self::read_json(req, "Failed to add comment").await
    }

    // ---- users ----

    pub async fn get_user(&self, user_id: &str) -> ApiResult<UserIn> {
        let path = format!("/users/{}", urlencoding::encode(user_id));
        let req = self.authed(Method::GET, &path)?;
        Self::read_json(req, "Failed to fetch user data").await
    }

    pub async fn update_user(&self, user_id: &str, body: &UpdateProfileDTO<'_>) -> ApiResult<()> {
        let path = format!("/users/{}", urlencoding::encode(user_id));
        let req = self.authed(Method::PUT, &path)?.json(body);
        Self::expect_success(req, "Failed to update profile. Try again.").await
    }

    // ---- notifications ----

    pub async fn list_notifications(&self, user_id: &str) -> ApiResult<Vec<NotificationIn>> {
        let path = format!("/notifications/{}", urlencoding::encode(user_id));
        let req = self.authed(Method::GET, &path)?;
        Self::read_json(req, "Failed to fetch notifications").await
    }

    pub async fn create_notification(&self, body: &CreateNotificationDTO) -> ApiResult<()> {
        let req = self.authed(Method::POST, "/notifications")?.json(body);
        Self::expect_success(req, "Failed to send notification").await
    }

    pub async fn mark_notifications_seen(&self, user_id: &str) -> ApiResult<()> {
        let path = format!("/notifications/mark-seen/{}", urlencoding::encode(user_id));
        let req = self.authed(Method::POST, &path)?;
        Self::expect_success(req, "Failed to mark notifications as read").await
    }
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(500) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

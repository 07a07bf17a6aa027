// src/services/post_view.rs - state of a single rendered post
use chrono::{DateTime, Utc};
use log::error;

use crate::dtos::post_dtos::LikeToggleOut;
use crate::error::{ApiError, ApiResult};
use crate::models::post::{Comment, Post};
use crate::repositories::api_client::ApiClient;
use crate::services::normalizer::normalize_comments;
use crate::services::optimistic::LikeUpdate;

pub const LIKE_ERROR_MESSAGE: &str = "Error updating like";
pub const COMMENT_ERROR_MESSAGE: &str = "Error adding comment";

/// One post as the user sees it: its own like counter and comment list,
/// seeded from the normalized post and then driven by server responses.
#[derive(Debug, Clone)]
pub struct PostView {
    pub post: Post,
    pub likes_count: u64,
    pub liked: bool,
    pub comments: Vec<Comment>,
    pub show_comments: bool,
    pub error: Option<String>,
}

impl PostView {
    pub fn new(post: Post, current_user_id: Option<&str>) -> Self {
        let likes_count = post.likes_count();
        let liked = current_user_id
            .and_then(|uid| post.liked_by(uid))
            .unwrap_or(false);
        let comments = post.comments.clone();
        Self {
            post,
            likes_count,
            liked,
            comments,
            show_comments: false,
            error: None,
        }
    }

    pub fn toggle_comments(&mut self) {
        self.show_comments = !self.show_comments;
    }

    pub fn share_link(&self, page_url: &str) -> String {
        format!("{}?post={}", page_url, urlencoding::encode(&self.post.id))
    }

    pub fn formatted_time(&self, now: DateTime<Utc>) -> String {
        self.post.age_label(now)
    }

    /// Adopts the server's count and flag. The returned update is what the
    /// owning feed should apply to its copy of the post.
    pub async fn toggle_like(&mut self, api: &ApiClient) -> ApiResult<(LikeUpdate, bool)> {
        match api.toggle_like(&self.post.id).await {
            Ok(LikeToggleOut { likes_count, liked }) => {
                self.likes_count = likes_count;
                self.liked = liked;
                self.error = None;
                Ok((LikeUpdate::SetCount(likes_count), liked))
            }
            Err(e) => {
                error!("{}: {}", LIKE_ERROR_MESSAGE, e);
                self.error = Some(LIKE_ERROR_MESSAGE.to_string());
                Err(e)
            }
        }
    }

    /// Blank text is rejected locally. On success the server's list replaces
    /// ours and is returned for the owning feed.
    pub async fn add_comment(&mut self, api: &ApiClient, text: &str) -> ApiResult<Vec<Comment>> {
        if text.trim().is_empty() {
            return Err(ApiError::validation("Comment cannot be empty"));
        }
        match api.add_comment(&self.post.id, text).await {
            Ok(raw) => {
                self.comments = normalize_comments(raw);
                self.error = None;
                Ok(self.comments.clone())
            }
            Err(e) => {
                error!("{}: {}", COMMENT_ERROR_MESSAGE, e);
                self.error = Some(COMMENT_ERROR_MESSAGE.to_string());
                Err(e)
            }
        }
    }
}

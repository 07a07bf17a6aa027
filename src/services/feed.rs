// src/services/feed.rs - feed state: posts, likes, comments and the unread dot
use std::sync::Arc;

use log::{error, info, warn};

use crate::dtos::post_dtos::PostIn;
use crate::error::{ApiError, ApiResult};
use crate::models::image::ImageFile;
use crate::models::notification::NotificationType;
use crate::models::post::{Comment, Post};
use crate::repositories::api_client::ApiClient;
use crate::services::normalizer::{normalize_comments, normalize_notification, normalize_post, normalize_posts};
use crate::services::notifier::{Dispatch, NotificationDispatcher, Notifier, SkipReason};
use crate::services::optimistic::{LikeUpdate, apply_like_update, replace_comments};

pub const NO_TOKEN_MESSAGE: &str = "No token found. Please login.";

pub struct Feed {
    api: ApiClient,
    dispatcher: NotificationDispatcher,
    pub posts: Vec<Post>,
    pub error: Option<String>,
    pub loading: bool,
}

impl Feed {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        let dispatcher = NotificationDispatcher::new(notifier, api.current_user_id());
        Self::with_dispatcher(api, dispatcher)
    }

    pub fn with_dispatcher(api: ApiClient, dispatcher: NotificationDispatcher) -> Self {
        Self {
            api,
            dispatcher,
            posts: Vec::new(),
            error: None,
            loading: true,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn dispatcher(&self) -> &NotificationDispatcher {
        &self.dispatcher
    }

    pub fn has_unread(&self) -> bool {
        self.dispatcher.has_unread()
    }

    pub fn post(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    pub fn is_empty_feed(&self) -> bool {
        !self.loading && self.error.is_none() && self.posts.is_empty()
    }

    /// Loads posts, then the current user's notifications to decide whether
    /// the unread dot is lit. Errors end up in `self.error` as well.
    pub async fn load(&mut self) -> ApiResult<()> {
        self.loading = true;
        let result = self.load_inner().await;
        self.loading = false;
        if let Err(e) = &result {
            self.error = Some(match e {
                ApiError::LoginRequired => NO_TOKEN_MESSAGE.to_string(),
                other => other.status_message(),
            });
        }
        result
    }

    async fn load_inner(&mut self) -> ApiResult<()> {
        if !self.api.session().is_logged_in() {
            return Err(ApiError::LoginRequired);
        }

        let raw = self.api.list_posts().await?;
        self.posts = normalize_posts(raw);
        self.error = None;
        info!("feed loaded: {} posts", self.posts.len());

        let Some(user_id) = self.api.current_user_id() else {
            return Ok(());
        };
        match self.api.list_notifications(&user_id).await {
            Ok(list) => {
                let unread = list
                    .into_iter()
                    .map(normalize_notification)
                    .any(|n| n.is_unread());
                self.dispatcher
                    .unread_flag()
                    .store(unread, std::sync::atomic::Ordering::SeqCst);
            }
            Err(ApiError::Application { status, message }) => {
                warn!("notifications unavailable ({}): {}", status, message);
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Adds a freshly created post to the top of the feed, normalized the
    /// same way as loaded posts.
    pub fn post_created(&mut self, raw: PostIn) -> &Post {
        self.posts.insert(0, normalize_post(raw));
        &self.posts[0]
    }

    pub async fn create_post(&mut self, image: Option<&ImageFile>, caption: &str) -> ApiResult<&Post> {
        let Some(image) = image else {
            return Err(ApiError::validation("Please select an image."));
        };
        if !self.api.session().is_logged_in() {
            return Err(ApiError::validation("You must be logged in to post."));
        }
        let raw = self.api.create_post(image, caption).await?;
        Ok(self.post_created(raw))
    }

    /// Applies a like signal to the post and, on a like, notifies its author.
    /// `liked` comes from the server when known; otherwise the toggle in
    /// `update` decides.
    pub fn apply_like(&mut self, post_id: &str, update: LikeUpdate, liked: Option<bool>) -> Dispatch {
        let liked = liked.or(update.liked());
        let Some(post) = self.posts.iter_mut().find(|p| p.id == post_id) else {
            warn!("like for unknown post {}", post_id);
            return Dispatch::Skipped(SkipReason::NoRecipient);
        };
        apply_like_update(&mut post.likes, update);

        if liked != Some(true) {
            return Dispatch::Skipped(SkipReason::NoRecipient);
        }
        let recipient = post.author_id().map(str::to_string);
        self.dispatcher
            .dispatch(recipient.as_deref(), NotificationType::Like, post_id, None)
    }

    /// Replaces the post's comments with `comments` and notifies the author
    /// about the last one.
    ///
    /// Only the last element is looked at, so a batch holding several new
    /// comments produces a single notification attributed to the last one.
    pub fn apply_comments(&mut self, post_id: &str, comments: Vec<Comment>) -> Dispatch {
        let Some(post) = self.posts.iter_mut().find(|p| p.id == post_id) else {
            warn!("comments for unknown post {}", post_id);
            return Dispatch::Skipped(SkipReason::NoRecipient);
        };
        replace_comments(post, comments);

        let Some(last) = post.comments.last() else {
            return Dispatch::Skipped(SkipReason::NoRecipient);
        };
        let comment_id = last.id.clone();
        let recipient = post.author_id().map(str::to_string);
        self.dispatcher.dispatch(
            recipient.as_deref(),
            NotificationType::Comment,
            post_id,
            comment_id.as_deref(),
        )
    }

    /// Server toggle followed by the local update. The server's count and
    /// flag are authoritative.
    pub async fn toggle_like(&mut self, post_id: &str) -> ApiResult<Dispatch> {
        let out = self.api.toggle_like(post_id).await.map_err(|e| {
            error!("like toggle failed for {}: {}", post_id, e);
            e
        })?;
        Ok(self.apply_like(post_id, LikeUpdate::SetCount(out.likes_count), Some(out.liked)))
    }

    pub async fn add_comment(&mut self, post_id: &str, text: &str) -> ApiResult<Dispatch> {
        if text.trim().is_empty() {
            return Err(ApiError::validation("Comment cannot be empty"));
        }
        let raw = self.api.add_comment(post_id, text).await?;
        Ok(self.apply_comments(post_id, normalize_comments(raw)))
    }
}

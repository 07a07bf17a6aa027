// src/services/normalizer.rs - wire payloads -> canonical view models
//
// Applied once at ingestion (feed load, post creation, profile posts). Missing
// optional fields degrade to defaults; nothing in here fails.

use chrono::{DateTime, TimeZone, Utc};

use crate::dtos::notification_dtos::NotificationIn;
use crate::dtos::post_dtos::{CommentIn, LikeEntryIn, LikesIn, PostIn, RefIn};
use crate::models::notification::{Notification, ReadState};
use crate::models::post::{
    AuthorRef, Comment, DEFAULT_PROFILE_IMAGE_URL, LikeEntry, Likes, Post, UNKNOWN_USER,
};

pub fn normalize_post(raw: PostIn) -> Post {
    let id = raw.post_id().unwrap_or_default().to_string();
    let author = normalize_author(raw.user_id);

    let username = non_empty(raw.username)
        .or_else(|| author.name().filter(|n| !n.is_empty()).map(str::to_string))
        .unwrap_or_else(|| UNKNOWN_USER.to_string());

    let profile_image_url = non_empty(raw.profile_image_url)
        .or_else(|| {
            author
                .profile_image_url()
                .filter(|u| !u.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_PROFILE_IMAGE_URL.to_string());

    let timestamp = raw
        .timestamp
        .as_ref()
        .and_then(parse_timestamp)
        .or_else(|| raw.created_at.as_ref().and_then(parse_timestamp));

    Post {
        id,
        image_url: non_empty(raw.image_url),
        caption: raw.caption.unwrap_or_default(),
        author,
        username,
        profile_image_url,
        timestamp,
        likes: normalize_likes(raw.likes),
        comments: normalize_comments(raw.comments.unwrap_or_default()),
    }
}

pub fn normalize_posts(raw: Vec<PostIn>) -> Vec<Post> {
    raw.into_iter().map(normalize_post).collect()
}

/// Sequences are kept in order, counts become that many placeholders (or
/// stay a bare count when too large to materialize), anything else
/// (missing, negative, fractional, garbage) is empty.
pub fn normalize_likes(raw: Option<LikesIn>) -> Likes {
    match raw {
        Some(LikesIn::Entries(entries)) => Likes::Entries(
            entries
                .into_iter()
                .map(|e| match e {
                    LikeEntryIn::Id(id) => LikeEntry::User(id),
                    LikeEntryIn::User { id } => LikeEntry::User(id),
                    LikeEntryIn::Other(_) => LikeEntry::Placeholder,
                })
                .collect(),
        ),
        Some(LikesIn::Count(n)) if n > 0 => Likes::from_count(n),
        _ => Likes::default(),
    }
}

pub fn normalize_author(raw: Option<RefIn>) -> AuthorRef {
    match raw {
        Some(RefIn::Id(id)) => AuthorRef::Id(id),
        Some(RefIn::Embedded(u)) => AuthorRef::Embedded {
            id: u.id,
            name: u.name,
            profile_image_url: u.profile_image_url,
        },
        Some(RefIn::Other(_)) | None => AuthorRef::Missing,
    }
}

pub fn normalize_comment(raw: CommentIn) -> Comment {
    Comment {
        id: non_empty(raw.id),
        username: non_empty(raw.username),
        text: raw.text.unwrap_or_default(),
    }
}

pub fn normalize_comments(raw: Vec<CommentIn>) -> Vec<Comment> {
    raw.into_iter().map(normalize_comment).collect()
}

pub fn normalize_notification(raw: NotificationIn) -> Notification {
    let timestamp = raw
        .timestamp
        .as_ref()
        .and_then(parse_timestamp)
        .or_else(|| raw.created_at.as_ref().and_then(parse_timestamp));

    Notification {
        id: non_empty(raw.id),
        recipient_id: raw.user_id.as_ref().and_then(RefIn::id).map(str::to_string),
        actor_id: raw.from_user.as_ref().and_then(RefIn::id).map(str::to_string),
        actor_name: raw.from_user.as_ref().and_then(RefIn::name).map(str::to_string),
        kind: raw.kind.unwrap_or_default(),
        post_id: raw.post_id.as_ref().and_then(RefIn::id).map(str::to_string),
        comment_id: raw.comment_id.as_ref().and_then(RefIn::id).map(str::to_string),
        message: raw.message.unwrap_or_default(),
        state: ReadState::from_flag(raw.read.unwrap_or(false)),
        timestamp,
    }
}

/// RFC 3339 strings or epoch milliseconds.
pub fn parse_timestamp(v: &serde_json::Value) -> Option<DateTime<Utc>> {
    match v {
        serde_json::Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        serde_json::Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Avatar shown when neither the post nor its embedded author carries one.
pub const DEFAULT_PROFILE_IMAGE_URL: &str = "https://i.postimg.cc/bYKxqBFF/pfp.jpg";
pub const UNKNOWN_USER: &str = "Unknown User";
pub const UNNAMED_COMMENTER: &str = "User";
/// Above this a like count is held as `Likes::Count` instead of placeholders.
pub const MAX_MATERIALIZED_LIKES: u64 = 100_000;

/// One slot in a materialized likes sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LikeEntry {
    User(String),
    /// Stands in for a like whose author is unknown (count-only payloads,
    /// optimistic toggles).
    Placeholder,
}

/// Local representation of a post's likes.
///
/// Posts coming out of the normalizer always hold `Entries`; the other two
/// variants exist because the feed may still hold a count or nothing at all
/// when an optimistic update lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Likes {
    Entries(Vec<LikeEntry>),
    Count(u64),
    Absent,
}

impl Likes {
    pub fn placeholders(n: usize) -> Self {
        Likes::Entries(vec![LikeEntry::Placeholder; n])
    }

    /// Placeholders for small counts, the bare count past
    /// `MAX_MATERIALIZED_LIKES`.
    pub fn from_count(n: u64) -> Self {
        if n <= MAX_MATERIALIZED_LIKES {
            Likes::placeholders(n as usize)
        } else {
            Likes::Count(n)
        }
    }

    pub fn count(&self) -> u64 {
        match self {
            Likes::Entries(entries) => entries.len() as u64,
            Likes::Count(n) => *n,
            Likes::Absent => 0,
        }
    }

    /// `None` when the answer isn't knowable: only a count is held, or the
    /// user isn't listed but anonymous placeholders are.
    pub fn liked_by(&self, user_id: &str) -> Option<bool> {
        let Likes::Entries(entries) = self else {
            return None;
        };
        if entries
            .iter()
            .any(|e| matches!(e, LikeEntry::User(id) if id == user_id))
        {
            return Some(true);
        }
        if entries.iter().any(|e| *e == LikeEntry::Placeholder) {
            None
        } else {
            Some(false)
        }
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Likes::Entries(_))
    }
}

impl Default for Likes {
    fn default() -> Self {
        Likes::Entries(Vec::new())
    }
}

/// Who wrote a post: the backend sends either the bare id or the populated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AuthorRef {
    Id(String),
    Embedded {
        id: Option<String>,
        name: Option<String>,
        profile_image_url: Option<String>,
    },
    Missing,
}

impl AuthorRef {
    pub fn id(&self) -> Option<&str> {
        match self {
            AuthorRef::Id(id) => Some(id.as_str()),
            AuthorRef::Embedded { id, .. } => id.as_deref(),
            AuthorRef::Missing => None,
        }
        .filter(|id| !id.is_empty())
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            AuthorRef::Embedded { name, .. } => name.as_deref(),
            _ => None,
        }
    }

    pub fn profile_image_url(&self) -> Option<&str> {
        match self {
            AuthorRef::Embedded { profile_image_url, .. } => profile_image_url.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    /// Unset until the backend has confirmed the comment.
    pub id: Option<String>,
    pub username: Option<String>,
    pub text: String,
}

impl Comment {
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(UNNAMED_COMMENTER)
    }
}

/// Canonical post view model. Build it with `services::normalizer`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: String,
    pub image_url: Option<String>,
    pub caption: String,
    pub author: AuthorRef,
    pub username: String,
    pub profile_image_url: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub likes: Likes,
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn author_id(&self) -> Option<&str> {
        self.author.id()
    }

    pub fn likes_count(&self) -> u64 {
        self.likes.count()
    }

    /// Only answerable when the likes are held as a sequence of ids.
    pub fn liked_by(&self, user_id: &str) -> Option<bool> {
        self.likes.liked_by(user_id)
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.author_id() == Some(user_id)
    }

    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        self.timestamp
            .map(|ts| relative_age(ts, now))
            .unwrap_or_default()
    }
}

/// Renders the distance between `then` and `now` as "5 minutes ago",
/// "about 2 hours ago" and so on.
pub fn relative_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds().max(0);
    let mins = (secs as f64 / 60.0).round() as i64;

    let distance = if secs < 30 {
        "less than a minute".to_string()
    } else if mins < 45 {
        plural(mins.max(1), "minute")
    } else if mins < 90 {
        "about 1 hour".to_string()
    } else if mins < 24 * 60 {
        format!("about {}", plural((mins as f64 / 60.0).round() as i64, "hour"))
    } else if mins < 42 * 60 {
        "1 day".to_string()
    } else if mins < 30 * 24 * 60 {
        plural((mins as f64 / (24.0 * 60.0)).round() as i64, "day")
    } else if mins < 45 * 24 * 60 {
        "about 1 month".to_string()
    } else if mins < 365 * 24 * 60 {
        plural(((mins as f64 / (30.0 * 24.0 * 60.0)).round() as i64).max(2), "month")
    } else {
        format!(
            "about {}",
            plural((mins as f64 / (365.0 * 24.0 * 60.0)).round() as i64, "year")
        )
    };

    format!("{} ago", distance)
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

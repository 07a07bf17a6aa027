use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const UNNAMED_ACTOR: &str = "User";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Like,
    Comment,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Like => "like",
            NotificationType::Comment => "comment",
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Unread -> Read` is the only transition; `Read` is terminal.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReadState {
    Unread,
    Read,
}

impl ReadState {
    pub fn from_flag(read: bool) -> Self {
        if read { ReadState::Read } else { ReadState::Unread }
    }

    /// Returns true when this call performed the transition.
    pub fn mark_read(&mut self) -> bool {
        match self {
            ReadState::Unread => {
                *self = ReadState::Read;
                true
            }
            ReadState::Read => false,
        }
    }

    pub fn is_read(&self) -> bool {
        *self == ReadState::Read
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: Option<String>,
    pub recipient_id: Option<String>,
    pub actor_id: Option<String>,
    pub actor_name: Option<String>,
    /// Raw type string, kept even when it isn't one we know.
    pub kind: String,
    pub post_id: Option<String>,
    pub comment_id: Option<String>,
    pub message: String,
    pub state: ReadState,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn notification_type(&self) -> Option<NotificationType> {
        match self.kind.as_str() {
            "like" => Some(NotificationType::Like),
            "comment" => Some(NotificationType::Comment),
            _ => None,
        }
    }

    pub fn is_unread(&self) -> bool {
        !self.state.is_read()
    }

    pub fn actor_display_name(&self) -> &str {
        self.actor_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(UNNAMED_ACTOR)
    }

    /// Server message with the actor's name taken out, since the name is
    /// rendered separately as a link.
    pub fn message_without_actor(&self) -> String {
        self.message.replacen(self.actor_display_name(), "", 1)
    }
}

// src/services/notification_services.rs - the notifications page
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use log::{error, info};

use crate::error::{ApiError, ApiResult};
use crate::models::notification::Notification;
use crate::repositories::api_client::ApiClient;
use crate::services::normalizer::normalize_notification;

/// One rendered row: actor name (a profile link) followed by the rest of the
/// message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationLine {
    pub actor_name: String,
    pub actor_id: Option<String>,
    pub text: String,
    pub post_id: Option<String>,
    pub unread: bool,
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<&Notification> for NotificationLine {
    fn from(n: &Notification) -> Self {
        NotificationLine {
            actor_name: n.actor_display_name().to_string(),
            actor_id: n.actor_id.clone(),
            text: n.message_without_actor(),
            post_id: n.post_id.clone(),
            unread: n.is_unread(),
            timestamp: n.timestamp,
        }
    }
}

/// Opening the inbox reads everything: if any item is unread, one
/// `mark-seen` call moves all of them to read.
pub struct NotificationInbox {
    api: ApiClient,
    unread_flag: Option<Arc<AtomicBool>>,
    pub notifications: Vec<Notification>,
    pub error: Option<String>,
    pub loading: bool,
}

impl NotificationInbox {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            unread_flag: None,
            notifications: Vec::new(),
            error: None,
            loading: false,
        }
    }

    /// Clears this indicator (usually the feed's) once everything is read.
    pub fn with_unread_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.unread_flag = Some(flag);
        self
    }

    pub async fn open(&mut self) -> ApiResult<()> {
        let user_id = match (self.api.current_user_id(), self.api.session().is_logged_in()) {
            (Some(id), true) => id,
            _ => {
                self.error = Some(ApiError::LoginRequired.status_message());
                return Err(ApiError::LoginRequired);
            }
        };

        self.loading = true;
        let result = self.api.list_notifications(&user_id).await;
        let result = match result {
            Ok(raw) => {
                self.notifications = raw.into_iter().map(normalize_notification).collect();
                self.error = None;
                if self.notifications.iter().any(Notification::is_unread) {
                    self.mark_all_read(&user_id).await;
                }
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.status_message());
                Err(e)
            }
        };
        self.loading = false;
        result
    }

    /// Failure is logged and leaves the items unread.
    async fn mark_all_read(&mut self, user_id: &str) {
        match self.api.mark_notifications_seen(user_id).await {
            Ok(()) => {
                let changed = self
                    .notifications
                    .iter_mut()
                    .map(|n| n.state.mark_read())
                    .filter(|changed| *changed)
                    .count();
                info!("marked {} notifications read", changed);
                if let Some(flag) = &self.unread_flag {
                    flag.store(false, Ordering::SeqCst);
                }
            }
            Err(e) => error!("Error marking notifications as read: {}", e),
        }
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| n.is_unread()).count()
    }

    pub fn lines(&self) -> Vec<NotificationLine> {
        self.notifications.iter().map(NotificationLine::from).collect()
    }
}

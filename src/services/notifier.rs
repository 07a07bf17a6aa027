// src/services/notifier.rs - best-effort like/comment notifications
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use log::{debug, error, warn};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::dtos::notification_dtos::CreateNotificationDTO;
use crate::error::ApiResult;
use crate::models::notification::NotificationType;
use crate::repositories::api_client::ApiClient;

/// Delivers one notification. Implementations may fail; the dispatcher
/// only logs it.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: CreateNotificationDTO) -> ApiResult<()>;
}

#[async_trait]
impl Notifier for ApiClient {
    async fn send(&self, notification: CreateNotificationDTO) -> ApiResult<()> {
        self.create_notification(&notification).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoRecipient,
    NoActor,
    SelfNotification,
    /// Called outside a tokio runtime, so there is nowhere to spawn the send.
    NoRuntime,
}

/// Result of a dispatch request. `Sent` holds the spawned delivery task;
/// callers normally drop it.
#[derive(Debug)]
pub enum Dispatch {
    Skipped(SkipReason),
    Sent(JoinHandle<()>),
}

impl Dispatch {
    pub fn is_sent(&self) -> bool {
        matches!(self, Dispatch::Sent(_))
    }

    /// Waits for delivery to finish. Skipped dispatches return immediately.
    pub async fn settle(self) {
        if let Dispatch::Sent(handle) = self {
            if let Err(e) = handle.await {
                error!("notification task panicked: {}", e);
            }
        }
    }
}

/// Fires notifications on behalf of the logged-in user. Never blocks the
/// caller and never retries. A successful delivery lights the shared unread
/// indicator.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
    actor_id: Option<String>,
    has_unread: Arc<AtomicBool>,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>, actor_id: Option<String>) -> Self {
        Self {
            notifier,
            actor_id,
            has_unread: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shares an existing indicator instead of creating a new one.
    pub fn with_unread_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.has_unread = flag;
        self
    }

    pub fn unread_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.has_unread)
    }

    pub fn has_unread(&self) -> bool {
        self.has_unread.load(Ordering::SeqCst)
    }

    pub fn actor_id(&self) -> Option<&str> {
        self.actor_id.as_deref()
    }

    /// Spawns on the current tokio runtime; without one the send is skipped.
    pub fn dispatch(
        &self,
        recipient: Option<&str>,
        kind: NotificationType,
        post_id: &str,
        comment_id: Option<&str>,
    ) -> Dispatch {
        let Some(recipient) = recipient.filter(|r| !r.is_empty()) else {
            return Dispatch::Skipped(SkipReason::NoRecipient);
        };
        let Some(actor) = self.actor_id.as_deref().filter(|a| !a.is_empty()) else {
            debug!("no acting user, {} notification for post {} skipped", kind, post_id);
            return Dispatch::Skipped(SkipReason::NoActor);
        };
        if recipient == actor {
            return Dispatch::Skipped(SkipReason::SelfNotification);
        }

        let Ok(runtime) = Handle::try_current() else {
            warn!("no tokio runtime, {} notification for post {} skipped", kind, post_id);
            return Dispatch::Skipped(SkipReason::NoRuntime);
        };

        let body = CreateNotificationDTO {
            user_id: recipient.to_string(),
            from_user: actor.to_string(),
            kind,
            post_id: post_id.to_string(),
            comment_id: comment_id.map(str::to_string),
        };
        let notifier = Arc::clone(&self.notifier);
        let has_unread = Arc::clone(&self.has_unread);

        Dispatch::Sent(runtime.spawn(async move {
            match notifier.send(body).await {
                Ok(()) => {
                    debug!("{} notification sent", kind);
                    has_unread.store(true, Ordering::SeqCst);
                }
                Err(e) => error!("Error sending notification: {}", e),
            }
        }))
    }
}

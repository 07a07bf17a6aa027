use serde::{Deserialize, Serialize};

use crate::dtos::post_dtos::{RefIn, lenient};
use crate::models::notification::NotificationType;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationIn {
    #[serde(rename = "_id", default, deserialize_with = "lenient")]
    pub id: Option<String>,
    /// Recipient.
    #[serde(default)]
    pub user_id: Option<RefIn>,
    /// Actor, populated or bare id.
    #[serde(default)]
    pub from_user: Option<RefIn>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(default)]
    pub post_id: Option<RefIn>,
    #[serde(default)]
    pub comment_id: Option<RefIn>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub read: Option<bool>,
    #[serde(default)]
    pub timestamp: Option<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<serde_json::Value>,
}

/// Body of `POST /notifications`. The backend names the recipient `userId`
/// and the actor `fromUser`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationDTO {
    pub user_id: String,
    pub from_user: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub post_id: String,
    pub comment_id: Option<String>,
}

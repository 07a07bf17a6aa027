use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Optional field whose value may arrive with the wrong JSON type; such a
/// value decodes as `None` instead of failing the whole document.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Post as the backend sends it. Every field is optional because the feed,
/// profile and create endpoints populate different subsets.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostIn {
    #[serde(rename = "_id", default, deserialize_with = "lenient")]
    pub mongo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub caption: Option<String>,
    /// Either the author's id or the populated author document.
    #[serde(default)]
    pub user_id: Option<RefIn>,
    #[serde(default, deserialize_with = "lenient")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub timestamp: Option<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<serde_json::Value>,
    #[serde(default)]
    pub likes: Option<LikesIn>,
    #[serde(default, deserialize_with = "lenient")]
    pub comments: Option<Vec<CommentIn>>,
}

impl PostIn {
    pub fn post_id(&self) -> Option<&str> {
        self.mongo_id.as_deref().or(self.id.as_deref())
    }
}

/// A bare document id or the populated document.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RefIn {
    Id(String),
    Embedded(UserRefIn),
    Other(serde_json::Value),
}

impl RefIn {
    pub fn id(&self) -> Option<&str> {
        match self {
            RefIn::Id(id) => Some(id.as_str()),
            RefIn::Embedded(u) => u.id.as_deref(),
            RefIn::Other(_) => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            RefIn::Embedded(u) => u.name.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRefIn {
    #[serde(rename = "_id", default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub profile_image_url: Option<String>,
}

/// `likes` has been observed both as an array and as a bare count.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LikesIn {
    Entries(Vec<LikeEntryIn>),
    Count(u64),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LikeEntryIn {
    Id(String),
    User {
        #[serde(rename = "_id")]
        id: String,
    },
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentIn {
    #[serde(rename = "_id", default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggleOut {
    pub likes_count: u64,
    pub liked: bool,
}

#[derive(Debug, Serialize)]
pub struct CreateCommentDTO<'a> {
    pub text: &'a str,
}

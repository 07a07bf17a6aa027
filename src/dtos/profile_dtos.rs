use serde::{Deserialize, Serialize};

use crate::dtos::post_dtos::lenient;
use crate::models::user::{ProfileForm, UserProfile};

/// `GET /users/{id}` payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIn {
    #[serde(rename = "_id", default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub userhandle: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub pronoun: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub instagram: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub profile_image_url: Option<String>,
}

impl From<UserIn> for UserProfile {
    fn from(u: UserIn) -> Self {
        UserProfile {
            id: u.id,
            name: u.name,
            userhandle: u.userhandle,
            bio: u.bio,
            department: u.department,
            pronoun: u.pronoun,
            linkedin: u.linkedin,
            instagram: u.instagram,
            profile_image_url: u.profile_image_url,
        }
    }
}

/// `PUT /users/{id}` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDTO<'a> {
    pub bio: &'a str,
    pub department: &'a str,
    pub pronoun: &'a str,
    pub linkedin: &'a str,
    pub instagram: &'a str,
    pub profile_image_url: &'a str,
}

impl<'a> From<&'a ProfileForm> for UpdateProfileDTO<'a> {
    fn from(f: &'a ProfileForm) -> Self {
        UpdateProfileDTO {
            bio: &f.bio,
            department: &f.department,
            pronoun: &f.pronoun,
            linkedin: &f.linkedin,
            instagram: &f.instagram,
            profile_image_url: &f.profile_image_url,
        }
    }
}

/// Image host upload response; only the durable URL is used.
#[derive(Debug, Deserialize)]
pub struct ImageUploadOut {
    pub secure_url: String,
}

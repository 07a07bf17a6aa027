use serde::Serialize;

use crate::models::post::{DEFAULT_PROFILE_IMAGE_URL, UNKNOWN_USER};

/// Profile as shown on a user's page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: Option<String>,
    pub name: Option<String>,
    pub userhandle: Option<String>,
    pub bio: Option<String>,
    pub department: Option<String>,
    pub pronoun: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub profile_image_url: Option<String>,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(UNKNOWN_USER)
    }

    pub fn avatar_url(&self) -> &str {
        self.profile_image_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_PROFILE_IMAGE_URL)
    }
}

/// Editable profile fields. Absent values load as empty strings and an empty
/// `profile_image_url` means "no photo".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub bio: String,
    pub department: String,
    pub pronoun: String,
    pub linkedin: String,
    pub instagram: String,
    pub profile_image_url: String,
}

impl ProfileForm {
    pub fn from_profile(profile: &UserProfile) -> Self {
        let field = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            bio: field(&profile.bio),
            department: field(&profile.department),
            pronoun: field(&profile.pronoun),
            linkedin: field(&profile.linkedin),
            instagram: field(&profile.instagram),
            profile_image_url: field(&profile.profile_image_url),
        }
    }

    pub fn remove_photo(&mut self) {
        self.profile_image_url.clear();
    }

    pub fn preview_url(&self) -> &str {
        if self.profile_image_url.is_empty() {
            DEFAULT_PROFILE_IMAGE_URL
        } else {
            &self.profile_image_url
        }
    }
}

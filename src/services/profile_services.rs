// src/services/profile_services.rs - profile page and edit form
use log::{info, warn};

use crate::dtos::post_dtos::PostIn;
use crate::dtos::profile_dtos::UpdateProfileDTO;
use crate::error::{ApiError, ApiResult};
use crate::models::image::ImageFile;
use crate::models::post::Post;
use crate::models::user::{ProfileForm, UserProfile};
use crate::repositories::api_client::ApiClient;
use crate::repositories::image_host::ImageHost;
use crate::services::normalizer::{normalize_post, normalize_posts};

#[derive(Debug, Clone)]
pub struct ProfilePage {
    pub user: UserProfile,
    pub posts: Vec<Post>,
    pub is_own_profile: bool,
}

impl ProfilePage {
    pub fn post_created(&mut self, raw: PostIn) {
        self.posts.insert(0, normalize_post(raw));
    }

    /// Index of the post a notification pointed at, for scrolling to it.
    pub fn position_of(&self, post_id: &str) -> Option<usize> {
        self.posts.iter().position(|p| p.id == post_id)
    }
}

pub struct ProfileService {
    api: ApiClient,
    images: ImageHost,
}

impl ProfileService {
    pub fn new(api: ApiClient, images: ImageHost) -> Self {
        Self { api, images }
    }

    /// User and their posts, fetched concurrently.
    pub async fn load_profile(&self, user_id: &str) -> ApiResult<ProfilePage> {
        if !self.api.session().is_logged_in() {
            return Err(ApiError::LoginRequired);
        }
        if user_id.trim().is_empty() {
            return Err(ApiError::validation("No userId in URL"));
        }

        let (user, posts) = futures::try_join!(
            self.api.get_user(user_id),
            self.api.list_user_posts(user_id)
        )?;

        let is_own_profile = self.api.current_user_id().as_deref() == Some(user_id);
        Ok(ProfilePage {
            user: user.into(),
            posts: normalize_posts(posts),
            is_own_profile,
        })
    }

    pub async fn load_form(&self, user_id: &str) -> ApiResult<ProfileForm> {
        let user: UserProfile = self.api.get_user(user_id).await?.into();
        Ok(ProfileForm::from_profile(&user))
    }

    /// Uploads `new_image` first when given. If that upload fails the
    /// profile is still saved, keeping the URL the form already had.
    pub async fn save_profile(
        &self,
        user_id: &str,
        form: &ProfileForm,
        new_image: Option<&ImageFile>,
    ) -> ApiResult<ProfileForm> {
        let mut updated = form.clone();

        if let Some(image) = new_image {
            match self.images.upload(image).await {
                Ok(url) => updated.profile_image_url = url,
                Err(e) => warn!("profile image upload failed, saving without it: {}", e),
            }
        }

        self.api
            .update_user(user_id, &UpdateProfileDTO::from(&updated))
            .await?;
        info!("profile {} updated", user_id);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    #[tokio::test]
    async fn load_requires_session_and_user_id() {
        let http = reqwest::Client::new();
        let images = ImageHost::new(http.clone(), "http://127.0.0.1:9", "cloud", "preset");

        let svc = ProfileService::new(
            ApiClient::new(http.clone(), "http://127.0.0.1:9/api", Session::default()),
            images.clone(),
        );
        assert!(matches!(svc.load_profile("u1").await, Err(ApiError::LoginRequired)));

        let svc = ProfileService::new(
            ApiClient::new(http, "http://127.0.0.1:9/api", Session::new("t", "me")),
            images,
        );
        assert!(svc.load_profile(" ").await.unwrap_err().is_validation());
    }
}

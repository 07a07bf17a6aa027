use log::{info, warn};
use reqwest::Client;
use reqwest::multipart::{Form, Part};

use crate::config::ClientConfig;
use crate::dtos::profile_dtos::ImageUploadOut;
use crate::error::{ApiError, ApiResult};
use crate::models::image::ImageFile;

/// Unsigned uploads to the third-party image host. Returns the durable URL
/// that ends up in `profileImageUrl`.
#[derive(Debug, Clone)]
pub struct ImageHost {
    http: Client,
    upload_url: String,
    upload_preset: String,
}

impl ImageHost {
    pub fn new(http: Client, base_url: &str, cloud_name: &str, upload_preset: impl Into<String>) -> Self {
        Self {
            http,
            upload_url: format!(
                "{}/v1_1/{}/image/upload",
                base_url.trim_end_matches('/'),
                urlencoding::encode(cloud_name)
            ),
            upload_preset: upload_preset.into(),
        }
    }

    pub fn from_config(http: Client, cfg: &ClientConfig) -> Self {
        Self::new(http, &cfg.image_host_base, &cfg.cloud_name, cfg.upload_preset.clone())
    }

    pub async fn upload(&self, image: &ImageFile) -> ApiResult<String> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(image.content_type.as_ref())?;
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let resp = self.http.post(&self.upload_url).multipart(form).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            warn!("image upload failed: {}", status);
            return Err(ApiError::from_body(status, &body, "Image upload failed"));
        }

        let out: ImageUploadOut = serde_json::from_str(&body)?;
        info!("image upload success: {}", out.secure_url);
        Ok(out.secure_url)
    }
}

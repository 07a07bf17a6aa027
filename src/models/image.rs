use std::path::Path;

use crate::error::{ApiError, ApiResult};

/// An image picked by the user, ready for a multipart upload.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: mime::Mime,
}

impl ImageFile {
    /// Rejects anything that isn't `image/*` or has no content.
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>, content_type: &str) -> ApiResult<Self> {
        let content_type: mime::Mime = content_type
            .parse()
            .map_err(|_| ApiError::validation("Invalid file type. Please select an image."))?;
        if content_type.type_() != mime::IMAGE {
            return Err(ApiError::validation("Invalid file type. Please select an image."));
        }
        if bytes.is_empty() {
            return Err(ApiError::validation("Please select an image."));
        }
        Ok(Self {
            bytes,
            file_name: file_name.into(),
            content_type,
        })
    }

    /// Guesses the content type from the file extension.
    pub fn from_path(path: &Path) -> ApiResult<Self> {
        let content_type = match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        };
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        Self::new(bytes, file_name, content_type)
    }
}

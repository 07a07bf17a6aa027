use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

pub const DEFAULT_API_BASE: &str = "https://srm-unigram-backend.onrender.com/api";
pub const DEFAULT_IMAGE_HOST_BASE: &str = "https://api.cloudinary.com";
pub const DEFAULT_CLOUD_NAME: &str = "dl79csna5";
pub const DEFAULT_UPLOAD_PRESET: &str = "unigram_unsigned";
pub const DEFAULT_SESSION_FILE: &str = ".unigram_session.json";
/// Appended to the SRM id typed at login, signup and password reset.
pub const SRM_EMAIL_DOMAIN: &str = "@srmist.edu.in";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base: String,
    pub image_host_base: String,
    pub cloud_name: String,
    pub upload_preset: String,
    pub session_file: PathBuf,
    pub http_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            image_host_base: DEFAULT_IMAGE_HOST_BASE.to_string(),
            cloud_name: DEFAULT_CLOUD_NAME.to_string(),
            upload_preset: DEFAULT_UPLOAD_PRESET.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            http_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let defaults = Self::default();

        let var = |key: &str, default: String| -> String {
            env::var(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        let timeout_secs = match env::var("UNIGRAM_HTTP_TIMEOUT_SECS") {
            Ok(v) => v
                .trim()
                .parse::<u64>()
                .context("UNIGRAM_HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            Err(_) => defaults.http_timeout.as_secs(),
        };

        Ok(Self {
            api_base: var("UNIGRAM_API_BASE", defaults.api_base)
                .trim_end_matches('/')
                .to_string(),
            image_host_base: var("CLOUDINARY_BASE", defaults.image_host_base)
                .trim_end_matches('/')
                .to_string(),
            cloud_name: var("CLOUDINARY_NAME", defaults.cloud_name),
            upload_preset: var("CLOUDINARY_UPLOAD_PRESET", defaults.upload_preset),
            session_file: PathBuf::from(var(
                "UNIGRAM_SESSION_FILE",
                defaults.session_file.to_string_lossy().into_owned(),
            )),
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn http_client(&self) -> Result<Client> {
        Client::builder()
            .user_agent(concat!("unigram-client/", env!("CARGO_PKG_VERSION")))
            .timeout(self.http_timeout)
            .build()
            .context("failed to build http client")
    }
}

/// Full email address for an SRM id.
pub fn srm_email(prefix: &str) -> String {
    format!("{}{}", prefix.trim(), SRM_EMAIL_DOMAIN)
}

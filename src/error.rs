// src/error.rs
use reqwest::StatusCode;
use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Try again.";
pub const LOGIN_REQUIRED_MESSAGE: &str = "Login required";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid local input, caught before any request is made.
    #[error("{0}")]
    Validation(String),
    #[error("login required")]
    LoginRequired,
    #[error("http error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("backend error ({status}): {message}")]
    Application { status: StatusCode, message: String },
    #[error("invalid json: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("session storage error: {0}")]
    Session(#[from] std::io::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    /// Builds an application error from a non-2xx body, preferring the
    /// backend's `message`, then `error`, then `fallback`.
    pub fn from_body(status: StatusCode, body: &str, fallback: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str())
                    .map(|m| m.to_string())
            })
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());

        ApiError::Application { status, message }
    }

    /// The string shown to the user in place of the failed action.
    pub fn status_message(&self) -> String {
        match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::LoginRequired => LOGIN_REQUIRED_MESSAGE.to_string(),
            ApiError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ApiError::Application { message, .. } => message.clone(),
            ApiError::Decode(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ApiError::Session(_) => LOGIN_REQUIRED_MESSAGE.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

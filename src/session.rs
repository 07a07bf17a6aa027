// src/session.rs - bearer token + current user, persisted between runs
use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// Everything a network call needs to know about who is logged in.
/// Passed explicitly to the api client instead of read from global storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Email awaiting OTP verification after signup.
    #[serde(default)]
    pub signup_email: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            user_id: Some(user_id.into()),
            ..Default::default()
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Token for the `Authorization` header, or `LoginRequired`.
    pub fn bearer(&self) -> ApiResult<&str> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::LoginRequired)
    }

    /// Stored user id, falling back to the `userId` claim inside the token.
    pub fn current_user_id(&self) -> Option<String> {
        if let Some(id) = self.user_id.as_deref().filter(|id| !id.is_empty()) {
            return Some(id.to_string());
        }
        let token = self.token.as_deref()?;
        match user_id_from_token(token) {
            Ok(id) => Some(id),
            Err(e) => {
                debug!("no user id in token: {}", e);
                None
            }
        }
    }

    pub fn logout(&mut self) {
        self.token = None;
        self.user_id = None;
        self.name = None;
    }
}

/// JSON file holding the session so it survives restarts.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty session. A corrupt one is logged and
    /// treated the same way.
    pub fn load(&self) -> ApiResult<Session> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Session::default()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(session),
            Err(e) => {
                warn!("ignoring unreadable session file {}: {}", self.path.display(), e);
                Ok(Session::default())
            }
        }
    }

    pub fn save(&self, session: &Session) -> ApiResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;
        Ok(())
    }

    pub fn clear(&self) -> ApiResult<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// First and last four characters of a token, for logs.
pub fn mask_token(t: &str) -> String {
    let chars: Vec<char> = t.chars().collect();
    if chars.len() <= 8 {
        return "[REDACTED]".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Reads the user id out of the token payload without checking the
/// signature; the backend does that.
pub fn user_id_from_token(token: &str) -> Result<String, String> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err("Invalid JWT format".to_string());
    }

    let payload = parts[1];
    let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| base64::engine::general_purpose::STANDARD.decode(payload))
        .map_err(|e| format!("base64 decode failed: {}", e))?;

    let json: serde_json::Value =
        serde_json::from_slice(&decoded).map_err(|e| format!("JSON parse error: {}", e))?;

    ["userId", "id", "sub"]
        .iter()
        .find_map(|k| json.get(*k).and_then(|v| v.as_str()))
        .map(|s| s.to_string())
        .ok_or_else(|| "Missing 'userId' claim in token".to_string())
}

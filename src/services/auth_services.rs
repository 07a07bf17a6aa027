// src/services/auth_services.rs - login, signup, OTP and password reset
use log::info;
use reqwest::StatusCode;

use crate::config::srm_email;
use crate::dtos::auth_dtos::{ForgotPasswordIn, LoginIn, LoginOut, ResetPasswordIn, SignupIn, VerifyOtpIn};
use crate::error::{ApiError, ApiResult};
use crate::repositories::api_client::ApiClient;
use crate::session::{Session, SessionStore, mask_token};

pub const LOGIN_OK: &str = "Login successful";
pub const SIGNUP_OK: &str = "Signup successful!";
pub const OTP_VERIFIED: &str = "OTP verified";
pub const OTP_SENT: &str = "OTP sent to your email. Check inbox!";
pub const PASSWORD_RESET_OK: &str = "Password reset successful!";

/// Every flow validates locally first; a validation error means no request
/// was made.
pub struct AuthService {
    api: ApiClient,
    store: SessionStore,
}

impl AuthService {
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self { api, store }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// On success the token is persisted, along with the user id and name
    /// when the response carries them.
    pub async fn login(&self, srm_id: &str, password: &str) -> ApiResult<Session> {
        if srm_id.trim().is_empty() {
            return Err(ApiError::validation("Please enter your SRM ID"));
        }
        if password.is_empty() {
            return Err(ApiError::validation("Please enter your password"));
        }

        let email = srm_email(srm_id);
        let out: LoginOut = self
            .api
            .auth_post("login", &LoginIn { email: &email, password }, "Login failed")
            .await?;

        let Some(token) = out.token.filter(|t| !t.is_empty()) else {
            let message = out.message.or(out.error).unwrap_or_else(|| "Login failed".to_string());
            return Err(ApiError::Application { status: StatusCode::OK, message });
        };

        let mut session = self.store.load()?;
        session.token = Some(token);
        if let Some(user_id) = out.user_id.filter(|id| !id.is_empty()) {
            session.user_id = Some(user_id);
        }
        if let Some(name) = out.name.filter(|n| !n.is_empty()) {
            session.name = Some(name);
        }
        self.store.save(&session)?;

        info!(
            "logged in as {} (token {})",
            session.user_id.as_deref().unwrap_or("?"),
            session.token.as_deref().map(mask_token).unwrap_or_default()
        );
        Ok(session)
    }

    pub async fn signup(&self, name: &str, reg_number: &str, srm_id: &str, password: &str) -> ApiResult<&'static str> {
        if name.trim().is_empty() {
            return Err(ApiError::validation("Please enter your full name"));
        }
        if reg_number.trim().is_empty() {
            return Err(ApiError::validation("Please enter your register number"));
        }
        if srm_id.trim().is_empty() {
            return Err(ApiError::validation("Please enter your SRM ID"));
        }
        if password.is_empty() {
            return Err(ApiError::validation("Please enter your password"));
        }

        let email = srm_email(srm_id);
        let reg_number = reg_number.trim().to_uppercase();
        let _: serde_json::Value = self
            .api
            .auth_post(
                "signup",
                &SignupIn { name, email: &email, password, reg_number: &reg_number },
                "Signup failed",
            )
            .await?;

        let mut session = self.store.load()?;
        session.signup_email = Some(email);
        self.store.save(&session)?;
        Ok(SIGNUP_OK)
    }

    /// Verifies the OTP for the email remembered by `signup`.
    pub async fn verify_otp(&self, otp: &str) -> ApiResult<&'static str> {
        if otp.trim().is_empty() {
            return Err(ApiError::validation("Please enter the OTP"));
        }
        let mut session = self.store.load()?;
        let email = session.signup_email.clone().unwrap_or_default();

        let _: serde_json::Value = self
            .api
            .auth_post("verify-otp", &VerifyOtpIn { email: &email, otp: otp.trim() }, "OTP verification failed")
            .await?;

        session.signup_email = None;
        self.store.save(&session)?;
        Ok(OTP_VERIFIED)
    }

    pub async fn forgot_password(&self, srm_id: &str) -> ApiResult<&'static str> {
        if srm_id.trim().is_empty() {
            return Err(ApiError::validation("Please enter your SRM ID"));
        }
        let email = srm_email(srm_id);
        let _: serde_json::Value = self
            .api
            .auth_post("forgot-password", &ForgotPasswordIn { email: &email }, "Failed to send OTP")
            .await?;
        Ok(OTP_SENT)
    }

    pub async fn reset_password(&self, srm_id: &str, otp: &str, new_password: &str) -> ApiResult<&'static str> {
        if otp.trim().is_empty() || new_password.is_empty() {
            return Err(ApiError::validation("Please enter OTP and new password"));
        }
        let email = srm_email(srm_id);
        let _: serde_json::Value = self
            .api
            .auth_post(
                "reset-password",
                &ResetPasswordIn { email: &email, otp: otp.trim(), new_password },
                "Failed to reset password",
            )
            .await?;
        Ok(PASSWORD_RESET_OK)
    }

    pub fn logout(&self) -> ApiResult<()> {
        self.store.clear()
    }
}

use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct LoginIn<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOut {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupIn<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub reg_number: &'a str,
}

#[derive(Serialize)]
pub struct VerifyOtpIn<'a> {
    pub email: &'a str,
    pub otp: &'a str,
}

#[derive(Serialize)]
pub struct ForgotPasswordIn<'a> {
    pub email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordIn<'a> {
    pub email: &'a str,
    pub otp: &'a str,
    pub new_password: &'a str,
}

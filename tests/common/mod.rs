#![allow(dead_code)]

use unigram_client::repositories::api_client::ApiClient;
use unigram_client::session::Session;
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";
pub const ME: &str = "me";

pub fn api_for(server: &MockServer, session: Session) -> ApiClient {
    ApiClient::new(reqwest::Client::new(), format!("{}/api", server.uri()), session)
}

pub fn logged_in(server: &MockServer) -> ApiClient {
    api_for(server, Session::new(TOKEN, ME))
}

pub fn bearer() -> String {
    format!("Bearer {}", TOKEN)
}

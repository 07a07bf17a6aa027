// src/main.rs - restore or create a session, then print the feed and inbox
use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use log::{error, info, warn};

use unigram_client::config::ClientConfig;
use unigram_client::repositories::api_client::ApiClient;
use unigram_client::services::auth_services::{AuthService, LOGIN_OK};
use unigram_client::services::feed::Feed;
use unigram_client::services::notification_services::NotificationInbox;
use unigram_client::session::{SessionStore, mask_token};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cfg = ClientConfig::from_env()?;
    let http = cfg.http_client()?;

    info!("API base: {}", cfg.api_base);
    info!("Session file: {}", cfg.session_file.display());

    let store = SessionStore::new(cfg.session_file.clone());
    let mut session = store.load().context("failed to read session file")?;

    if !session.is_logged_in() {
        let (srm_id, password) = match (env::var("UNIGRAM_SRM_ID"), env::var("UNIGRAM_PASSWORD")) {
            (Ok(id), Ok(pw)) => (id, pw),
            _ => {
                error!("No session found. Set UNIGRAM_SRM_ID and UNIGRAM_PASSWORD to log in.");
                std::process::exit(1);
            }
        };
        let auth = AuthService::new(ApiClient::new(http.clone(), &cfg.api_base, session.clone()), store.clone());
        session = match auth.login(&srm_id, &password).await {
            Ok(s) => {
                info!("{}", LOGIN_OK);
                s
            }
            Err(e) => {
                error!("{}", e.status_message());
                std::process::exit(1);
            }
        };
    }

    info!(
        "Session token: {}",
        session.token.as_deref().map(mask_token).unwrap_or_default()
    );

    let api = ApiClient::new(http, &cfg.api_base, session);
    let mut feed = Feed::new(api.clone(), Arc::new(api.clone()));

    if let Err(e) = feed.load().await {
        error!("{}", feed.error.clone().unwrap_or_else(|| e.status_message()));
        std::process::exit(1);
    }
    if feed.is_empty_feed() {
        info!("No posts yet");
    }

    let now = Utc::now();
    let me = api.current_user_id();
    for post in &feed.posts {
        let liked = match me.as_deref().and_then(|uid| post.liked_by(uid)) {
            Some(true) => "liked",
            Some(false) => "",
            None => "?",
        };
        info!(
            "{} | {} | {} likes {} | {} comments | {}",
            post.id,
            post.username,
            post.likes_count(),
            liked,
            post.comments.len(),
            post.age_label(now)
        );
    }
    info!("Unread notifications: {}", feed.has_unread());

    if env::var("UNIGRAM_OPEN_INBOX").is_ok() {
        let mut inbox = NotificationInbox::new(api).with_unread_flag(feed.dispatcher().unread_flag());
        match inbox.open().await {
            Ok(()) => {
                for line in inbox.lines() {
                    info!("{}{}", line.actor_name, line.text);
                }
            }
            Err(e) => warn!("{}", e.status_message()),
        }
    }

    Ok(())
}

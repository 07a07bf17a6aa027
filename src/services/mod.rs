pub mod auth_services;
pub mod feed;
pub mod normalizer;
pub mod notification_services;
pub mod notifier;
pub mod optimistic;
pub mod post_view;
pub mod profile_services;

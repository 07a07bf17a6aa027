pub mod auth_dtos;
pub mod notification_dtos;
pub mod post_dtos;
pub mod profile_dtos;

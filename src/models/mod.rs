pub mod image;
pub mod notification;
pub mod post;
pub mod user;

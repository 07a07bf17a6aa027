//! Client for the unigram social backend: auth flows, feed, posts with likes
//! and comments, profiles and notifications.
//!
//! Server payloads come in several shapes (likes as ids or a bare count,
//! authors as ids or populated documents). They are normalized once on the
//! way in by [`services::normalizer`]; everything downstream works on the
//! canonical [`models::post::Post`].

pub mod config;
pub mod dtos;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;
pub mod session;

pub use error::{ApiError, ApiResult};
pub use session::{Session, SessionStore};

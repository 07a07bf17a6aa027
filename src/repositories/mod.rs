pub mod api_client;
pub mod image_host;

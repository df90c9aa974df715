pub mod artsy_format;
pub mod artsy_service;
pub mod artsy_token;
pub mod auth_service;
pub mod favorite_service;

pub use artsy_service::{ArtsyApi, ArtsyClient};
pub use auth_service::SessionKeys;

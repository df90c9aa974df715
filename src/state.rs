use crate::config::AppConfig;
use crate::database::{FavoriteStore, MongoDB, UserStore};
use crate::services::{ArtsyApi, ArtsyClient, SessionKeys};
use crate::utils::AppError;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserStore>,
    pub favorites: Arc<dyn FavoriteStore>,
    pub artsy: Arc<dyn ArtsyApi>,
    pub sessions: SessionKeys,
}

impl AppState {
    pub fn new(config: AppConfig, db: MongoDB) -> Result<Self, AppError> {
        let artsy = Arc::new(ArtsyClient::new(&config.artsy)?) as Arc<dyn ArtsyApi>;
        let db = Arc::new(db);
        Ok(Self::from_parts(
            Arc::new(config),
            db.clone(),
            db,
            artsy,
        ))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserStore>,
        favorites: Arc<dyn FavoriteStore>,
        artsy: Arc<dyn ArtsyApi>,
    ) -> Self {
        let sessions = SessionKeys::new(&config.jwt_secret, &config.jwt_issuer);
        Self {
            config,
            users,
            favorites,
            artsy,
            sessions,
        }
    }

    #[cfg(test)]
    pub fn fake(environment: crate::config::Environment) -> Self {
        use crate::config::ArtsyConfig;
        use crate::database::memory::{MemoryFavorites, MemoryUsers};
        use crate::services::artsy_service::testing::FakeArtsy;

        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            environment,
            cors_origin: "http://localhost:4200".into(),
            mongodb_uri: "mongodb://localhost:27017/test".into(),
            database_name: "test".into(),
            jwt_secret: "test-secret".into(),
            jwt_issuer: "test".into(),
            artsy: ArtsyConfig {
                api_base: "http://localhost".into(),
                web_url: "https://www.artsy.net".into(),
                client_id: "id".into(),
                client_secret: "secret".into(),
            },
        });

        Self::from_parts(
            config,
            Arc::new(MemoryUsers::default()),
            Arc::new(MemoryFavorites::default()),
            Arc::new(FakeArtsy::default()),
        )
    }
}

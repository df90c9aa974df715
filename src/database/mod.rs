pub mod favorites;
pub mod users;

#[cfg(test)]
pub mod memory;

pub use favorites::FavoriteStore;
pub use users::UserStore;

use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use std::time::Duration;
use thiserror::Error;

pub const USERS: &str = "users";
pub const FAVORITES: &str = "favorites";

const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key")]
    DuplicateKey,
    #[error("{0}")]
    Backend(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            StoreError::DuplicateKey
        } else {
            StoreError::Backend(err.to_string())
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        _ => false,
    }
}

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(Duration::from_secs(300));
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Unique email, unique (user, artistId), and the list ordering index.
    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        log::info!("🔧 Creating database indexes...");

        let users = self.collection::<mongodb::bson::Document>(USERS);
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        users.create_index(email_index).await?;
        log::info!("   ✅ Index ready: users(email) unique");

        let favorites = self.collection::<mongodb::bson::Document>(FAVORITES);
        let pair_index = IndexModel::builder()
            .keys(doc! { "user": 1, "artistId": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        favorites.create_index(pair_index).await?;
        log::info!("   ✅ Index ready: favorites(user, artistId) unique");

        let recent_index = IndexModel::builder()
            .keys(doc! { "user": 1, "addedAt": -1 })
            .build();
        match favorites.create_index(recent_index).await {
            Ok(_) => log::info!("   ✅ Index ready: favorites(user, addedAt)"),
            Err(e) => log::debug!("   ℹ️  Index favorites(user, addedAt) skipped: {}", e),
        }

        log::info!("✅ Database indexes ready");
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}

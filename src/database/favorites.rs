use super::{MongoDB, StoreError, FAVORITES};
use crate::models::Favorite;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};

#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Newest `addedAt` first.
    async fn list(&self, user: &ObjectId) -> Result<Vec<Favorite>, StoreError>;
    async fn find(&self, user: &ObjectId, artist_id: &str) -> Result<Option<Favorite>, StoreError>;
    /// Fails with `DuplicateKey` when the (user, artistId) pair exists.
    async fn insert(&self, favorite: &Favorite) -> Result<(), StoreError>;
    async fn delete(&self, user: &ObjectId, artist_id: &str) -> Result<Option<Favorite>, StoreError>;
    async fn delete_all(&self, user: &ObjectId) -> Result<u64, StoreError>;
}

#[async_trait]
impl FavoriteStore for MongoDB {
    async fn list(&self, user: &ObjectId) -> Result<Vec<Favorite>, StoreError> {
        let cursor = self
            .collection::<Favorite>(FAVORITES)
            .find(doc! { "user": *user })
            .sort(doc! { "addedAt": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find(&self, user: &ObjectId, artist_id: &str) -> Result<Option<Favorite>, StoreError> {
        Ok(self
            .collection::<Favorite>(FAVORITES)
            .find_one(doc! { "user": *user, "artistId": artist_id })
            .await?)
    }

    async fn insert(&self, favorite: &Favorite) -> Result<(), StoreError> {
        self.collection::<Favorite>(FAVORITES).insert_one(favorite).await?;
        Ok(())
    }

    async fn delete(&self, user: &ObjectId, artist_id: &str) -> Result<Option<Favorite>, StoreError> {
        Ok(self
            .collection::<Favorite>(FAVORITES)
            .find_one_and_delete(doc! { "user": *user, "artistId": artist_id })
            .await?)
    }

    async fn delete_all(&self, user: &ObjectId) -> Result<u64, StoreError> {
        let result = self
            .collection::<Favorite>(FAVORITES)
            .delete_many(doc! { "user": *user })
            .await?;
        Ok(result.deleted_count)
    }
}

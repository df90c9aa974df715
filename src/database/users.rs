use super::{MongoDB, StoreError, USERS};
use crate::models::User;
use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// `email` must already be normalized.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, StoreError>;
    async fn insert(&self, user: &User) -> Result<(), StoreError>;
    /// Returns whether a document was removed.
    async fn delete(&self, id: &ObjectId) -> Result<bool, StoreError>;
    /// Round-trip to the backing store.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl UserStore for MongoDB {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .collection::<User>(USERS)
            .find_one(doc! { "email": email })
            .await?)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, StoreError> {
        Ok(self
            .collection::<User>(USERS)
            .find_one(doc! { "_id": *id })
            .await?)
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        self.collection::<User>(USERS).insert_one(user).await?;
        Ok(())
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, StoreError> {
        let result = self
            .collection::<User>(USERS)
            .delete_one(doc! { "_id": *id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        MongoDB::ping(self).await
    }
}

//! In-process stores with the same uniqueness rules as the MongoDB indexes.

use super::{FavoriteStore, StoreError, UserStore};
use crate::models::{Favorite, User};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryUsers {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserStore for MemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.id == id).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateKey);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, StoreError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| &u.id != id);
        Ok(users.len() != before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryFavorites {
    favorites: Mutex<Vec<Favorite>>,
}

#[async_trait]
impl FavoriteStore for MemoryFavorites {
    async fn list(&self, user: &ObjectId) -> Result<Vec<Favorite>, StoreError> {
        let favorites = self.favorites.lock().unwrap();
        let mut owned: Vec<Favorite> = favorites.iter().filter(|f| &f.user == user).cloned().collect();
        owned.sort_by(|a, b| b.added_at.cmp(&a.added_at));
        Ok(owned)
    }

    async fn find(&self, user: &ObjectId, artist_id: &str) -> Result<Option<Favorite>, StoreError> {
        let favorites = self.favorites.lock().unwrap();
        Ok(favorites
            .iter()
            .find(|f| &f.user == user && f.artist_id == artist_id)
            .cloned())
    }

    async fn insert(&self, favorite: &Favorite) -> Result<(), StoreError> {
        let mut favorites = self.favorites.lock().unwrap();
        if favorites
            .iter()
            .any(|f| f.user == favorite.user && f.artist_id == favorite.artist_id)
        {
            return Err(StoreError::DuplicateKey);
        }
        favorites.push(favorite.clone());
        Ok(())
    }

    async fn delete(&self, user: &ObjectId, artist_id: &str) -> Result<Option<Favorite>, StoreError> {
        let mut favorites = self.favorites.lock().unwrap();
        let position = favorites
            .iter()
            .position(|f| &f.user == user && f.artist_id == artist_id);
        Ok(position.map(|i| favorites.remove(i)))
    }

    async fn delete_all(&self, user: &ObjectId) -> Result<u64, StoreError> {
        let mut favorites = self.favorites.lock().unwrap();
        let before = favorites.len();
        favorites.retain(|f| &f.user != user);
        Ok((before - favorites.len()) as u64)
    }
}
